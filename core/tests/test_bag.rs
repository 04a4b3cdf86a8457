// * end-to-end bag layout and tag file contents
// * a root already holding `data` is refused untouched
// * multiple manifests from one read
// * precondition and config failures leave the directory untouched
// * manifests verify against a fresh digest of the payload

#[cfg(test)]
mod bag_tests {
    use std::collections::{BTreeSet, HashMap};
    use std::fs;
    use std::path::Path;

    use bagit_core::digest::{digest_file, DigestAlg};
    use bagit_core::metadata::BagInfo;
    use bagit_core::telemetry::Stage;
    use bagit_core::{create_bag, BagBuilder, BagError};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    // ------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------
    fn scenario(root: &Path) {
        fs::write(root.join("a.txt"), b"hi").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/b.txt"), b"yo").unwrap();
    }

    fn names(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn pinned_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    // ------------------------------------------------------------
    // Happy path
    // ------------------------------------------------------------
    #[test]
    fn bags_a_small_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        scenario(root);

        let mut info = BagInfo::new();
        info.insert("Contact-Name", "Ed Summers");
        let report = BagBuilder::new(root)
            .metadata(info)
            .workers(1)
            .bagging_date(pinned_date())
            .build()
            .unwrap();

        assert_eq!(names(root), set(&["bag-info.txt", "bagit.txt", "data", "manifest-md5.txt"]));
        assert_eq!(names(&root.join("data")), set(&["a.txt", "sub"]));
        assert_eq!(fs::read(root.join("data/sub/b.txt")).unwrap(), b"yo");

        assert_eq!(
            fs::read_to_string(root.join("manifest-md5.txt")).unwrap(),
            "49f68a5c8493ec2c0bf489821c21fc3b  data/a.txt\n\
             6d0007e52f7afb7d5a0650b0ffb8a4d1  data/sub/b.txt\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("bagit.txt")).unwrap(),
            "BagIt-Version: 0.96\nTag-File-Character-Encoding: UTF-8\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("bag-info.txt")).unwrap(),
            "Bagging-Date: 2024-05-17\nContact-Name: Ed Summers\nPayload-Oxum: 4.2\n"
        );

        assert_eq!(report.oxum.to_string(), "4.2");
        assert_eq!(report.root, fs::canonicalize(root).unwrap());
        assert_eq!(report.payload_dir, report.root.join("data"));
        assert_eq!(report.bag_info.get("Payload-Oxum"), Some("4.2"));
        assert_eq!(report.telemetry.entries_moved, 2);
        assert_eq!(report.telemetry.files_digested, 2);
        assert_eq!(report.telemetry.bytes_digested, 4);
        assert_eq!(report.telemetry.manifest_lines, 2);
        assert_eq!(report.telemetry.tag_files_written, 2);
        assert!(report
            .telemetry
            .stage_times
            .has_all(&[Stage::Reorganize, Stage::Walk, Stage::Digest, Stage::Write]));
    }

    #[test]
    fn create_bag_accepts_a_plain_map() {
        let dir = tempdir().unwrap();
        scenario(dir.path());

        let mut metadata = HashMap::new();
        metadata.insert("Source-Organization".to_string(), "Library of Congress".to_string());
        metadata.insert("Payload-Oxum".to_string(), "1.1".to_string());
        create_bag(dir.path(), metadata, 2).unwrap();

        let info = fs::read_to_string(dir.path().join("bag-info.txt")).unwrap();
        let lines: Vec<&str> = info.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Bagging-Date: "));
        assert_eq!(lines[0].len(), "Bagging-Date: YYYY-MM-DD".len());
        assert_eq!(lines[1], "Payload-Oxum: 4.2");
        assert_eq!(lines[2], "Source-Organization: Library of Congress");
    }

    #[test]
    fn empty_directory_becomes_an_empty_bag() {
        let dir = tempdir().unwrap();
        let report = BagBuilder::new(dir.path()).bagging_date(pinned_date()).build().unwrap();

        assert_eq!(report.oxum.to_string(), "0.0");
        assert!(dir.path().join("data").is_dir());
        assert_eq!(fs::read_dir(dir.path().join("data")).unwrap().count(), 0);
        assert_eq!(fs::read(dir.path().join("manifest-md5.txt")).unwrap(), b"");
        assert_eq!(
            fs::read_to_string(dir.path().join("bag-info.txt")).unwrap(),
            "Bagging-Date: 2024-05-17\nPayload-Oxum: 0.0\n"
        );
    }

    #[test]
    fn one_manifest_per_algorithm() {
        let dir = tempdir().unwrap();
        scenario(dir.path());

        let report = BagBuilder::new(dir.path())
            .algorithms(&[DigestAlg::Md5, DigestAlg::Sha256])
            .workers(3)
            .build()
            .unwrap();

        assert_eq!(report.manifests.len(), 2);
        assert_eq!(report.telemetry.manifest_lines, 4);
        assert_eq!(
            fs::read_to_string(dir.path().join("manifest-sha256.txt")).unwrap(),
            "8f434346648f6b96df89dda901c5176b10a6d83961dd3c1ac88b59b2dc327aa4  data/a.txt\n\
             e9058ab198f6908f702111b0c0fb5b36f99d00554521886c40e2891b349dc7a1  data/sub/b.txt\n"
        );
        assert!(dir.path().join("manifest-md5.txt").exists());
    }

    #[test]
    fn manifests_verify_against_the_payload() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for i in 0..25usize {
            let sub = root.join(format!("dir{}", i % 3));
            fs::create_dir_all(&sub).unwrap();
            fs::write(sub.join(format!("file{i}")), vec![i as u8; i * 1000]).unwrap();
        }

        let report = BagBuilder::new(root)
            .algorithms(&[DigestAlg::Sha512])
            .workers(4)
            .chunk_size(4096)
            .build()
            .unwrap();
        assert_eq!(report.oxum.files, 25);

        let manifest = fs::read_to_string(root.join("manifest-sha512.txt")).unwrap();
        let mut total = 0u64;
        for line in manifest.lines() {
            let (hex, rel) = line.split_once("  ").unwrap();
            let fresh = digest_file(&root.join(rel), &[DigestAlg::Sha512], 64 * 1024).unwrap();
            assert_eq!(fresh.hex(DigestAlg::Sha512), Some(hex), "{rel}");
            total += fresh.bytes;
        }
        assert_eq!(manifest.lines().count(), 25);
        assert_eq!(total, report.oxum.bytes);
    }

    #[test]
    fn requested_chunk_size_is_rounded_onto_tuned_sizes() {
        let cases = [
            (None, 16 * 1024),
            (Some(1), 16 * 1024),
            (Some(40 * 1024), 64 * 1024),
            (Some(usize::MAX), 8 * 1024 * 1024),
        ];
        for (requested, used) in cases {
            let dir = tempdir().unwrap();
            scenario(dir.path());

            let mut builder = BagBuilder::new(dir.path());
            if let Some(size) = requested {
                builder = builder.chunk_size(size);
            }
            let report = builder.build().unwrap();
            assert_eq!(report.chunk_size, used, "{requested:?}");
            assert_eq!(report.oxum.to_string(), "4.2");
        }
    }

    #[test]
    fn distinct_directories_can_be_bagged_concurrently() {
        let dirs: Vec<_> = (0..4).map(|_| tempdir().unwrap()).collect();
        for d in &dirs {
            scenario(d.path());
        }

        std::thread::scope(|scope| {
            for d in &dirs {
                scope.spawn(move || {
                    BagBuilder::new(d.path()).workers(2).bagging_date(pinned_date()).build().unwrap();
                });
            }
        });

        let first = fs::read(dirs[0].path().join("manifest-md5.txt")).unwrap();
        for d in &dirs[1..] {
            assert_eq!(fs::read(d.path().join("manifest-md5.txt")).unwrap(), first);
        }
    }

    // ------------------------------------------------------------
    // Failures
    // ------------------------------------------------------------
    #[test]
    fn existing_data_entry_is_rejected_before_moving_anything() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("data")).unwrap();
        fs::write(root.join("data/x"), b"hi").unwrap();
        fs::write(root.join("top.txt"), b"yo").unwrap();

        let err = BagBuilder::new(root).build().unwrap_err();
        match &err {
            BagError::Reorganize { path, source } => {
                assert!(path.ends_with("data"));
                assert_eq!(source.kind(), std::io::ErrorKind::AlreadyExists);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(names(root), set(&["data", "top.txt"]));
        assert_eq!(names(&root.join("data")), set(&["x"]));
        assert!(!root.join("data/data").exists());
    }

    #[test]
    fn plain_file_named_data_is_rejected_too() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("data"), b"hi").unwrap();

        let err = create_bag(dir.path(), BagInfo::new(), 1).unwrap_err();
        assert!(matches!(err, BagError::Reorganize { .. }), "{err}");
        assert_eq!(fs::read(dir.path().join("data")).unwrap(), b"hi");
        assert_eq!(names(dir.path()), set(&["data"]));
    }

    #[test]
    fn missing_directory_is_reported_without_side_effects() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = create_bag(&missing, BagInfo::new(), 1).unwrap_err();
        assert!(matches!(err, BagError::MissingDirectory(ref p) if *p == missing));
        assert!(err.is_precondition());
        assert!(!missing.exists());
    }

    #[test]
    fn a_file_is_not_a_bag_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, b"hi").unwrap();

        let err = BagBuilder::new(&file).build().unwrap_err();
        assert!(matches!(err, BagError::MissingDirectory(_)));
        assert_eq!(fs::read(&file).unwrap(), b"hi");
    }

    #[test]
    fn invalid_config_is_rejected_before_moving_anything() {
        let dir = tempdir().unwrap();
        scenario(dir.path());
        let before = names(dir.path());

        let err = create_bag(dir.path(), BagInfo::new(), 0).unwrap_err();
        assert!(matches!(err, BagError::InvalidConfig(_)));
        assert!(err.is_precondition());

        let err = BagBuilder::new(dir.path()).algorithms(&[]).build().unwrap_err();
        assert!(matches!(err, BagError::InvalidConfig(_)));

        let err = BagBuilder::new(dir.path()).chunk_size(0).build().unwrap_err();
        assert!(matches!(err, BagError::InvalidConfig(_)));

        assert_eq!(names(dir.path()), before);
    }

    #[cfg(unix)]
    #[test]
    fn digest_failure_leaves_no_manifest_or_tag_files() {
        let dir = tempdir().unwrap();
        scenario(dir.path());
        std::os::unix::fs::symlink(dir.path().join("vanished"), dir.path().join("broken")).unwrap();

        let err = BagBuilder::new(dir.path()).workers(2).build().unwrap_err();
        assert!(matches!(err, BagError::Digest(_)), "{err}");
        assert!(!err.is_precondition());

        // Payload was already moved; no rollback.
        assert_eq!(names(dir.path()), set(&["data"]));
        assert_eq!(names(&dir.path().join("data")), set(&["a.txt", "broken", "sub"]));
    }
}
