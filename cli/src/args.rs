use std::path::PathBuf;

use bagit_core::digest::DigestAlg;
use bagit_core::metadata::{header_from_flag, BagInfo};
use clap::{Args as ClapArgs, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "bagit",
    version,
    about = "Convert directories into BagIt bags, in place",
    override_usage = "bagit [OPTIONS] <DIR>..."
)]
pub struct Args {
    /// Directories to bag; each one is converted independently
    #[arg(value_name = "DIR", required = true)]
    pub directories: Vec<PathBuf>,

    /// Number of parallel checksum workers
    #[arg(long, default_value_t = 1)]
    pub processes: usize,

    /// Append log output to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Only log errors
    #[arg(long)]
    pub quiet: bool,

    /// Manifest algorithm (md5, sha256, sha512); repeat for several manifests
    #[arg(long = "algorithm", value_name = "ALG", value_parser = parse_algorithm)]
    pub algorithms: Vec<DigestAlg>,

    #[command(flatten)]
    pub bag_info: BagInfoArgs,
}

impl Args {
    /// Requested algorithms, md5 when none were given.
    pub fn algorithms(&self) -> Vec<DigestAlg> {
        if self.algorithms.is_empty() {
            vec![DigestAlg::default()]
        } else {
            self.algorithms.clone()
        }
    }
}

fn parse_algorithm(s: &str) -> Result<DigestAlg, String> {
    s.parse::<DigestAlg>().map_err(|e| e.to_string())
}

/// One option per standard `bag-info.txt` header.
#[derive(ClapArgs, Debug, Default, Clone)]
#[command(next_help_heading = "bag-info.txt")]
pub struct BagInfoArgs {
    #[arg(long, value_name = "VALUE")]
    pub source_organization: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub organization_address: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub contact_name: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub contact_phone: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub contact_email: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub external_description: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub external_identifier: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub bag_size: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub bag_group_identifier: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub bag_count: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub internal_sender_identifier: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub internal_sender_description: Option<String>,
}

impl BagInfoArgs {
    /// Each set flag becomes one header, named by `header_from_flag`.
    pub fn to_bag_info(&self) -> BagInfo {
        let flags = [
            ("source-organization", &self.source_organization),
            ("organization-address", &self.organization_address),
            ("contact-name", &self.contact_name),
            ("contact-phone", &self.contact_phone),
            ("contact-email", &self.contact_email),
            ("external-description", &self.external_description),
            ("external-identifier", &self.external_identifier),
            ("bag-size", &self.bag_size),
            ("bag-group-identifier", &self.bag_group_identifier),
            ("bag-count", &self.bag_count),
            ("internal-sender-identifier", &self.internal_sender_identifier),
            ("internal-sender-description", &self.internal_sender_description),
        ];
        flags
            .into_iter()
            .filter_map(|(flag, value)| value.as_ref().map(|v| (header_from_flag(flag), v.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bagit_core::constants::headers;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn every_header_flag_names_a_standard_header() {
        let cmd = BagInfoArgs::augment_args(clap::Command::new("bag-info"));
        let longs: Vec<String> = cmd
            .get_arguments()
            .filter_map(|a| a.get_long().map(str::to_string))
            .collect();
        assert_eq!(longs.len(), headers::STANDARD.len());
        for long in longs {
            assert!(headers::STANDARD.contains(&header_from_flag(&long).as_str()), "{long}");
        }
    }

    #[test]
    fn every_header_flag_reaches_bag_info() {
        let mut argv = vec!["bagit".to_string()];
        for header in headers::STANDARD {
            argv.push(format!("--{}", header.to_lowercase()));
            argv.push(format!("value for {header}"));
        }
        argv.push("dir".to_string());

        let info = Args::try_parse_from(argv).unwrap().bag_info.to_bag_info();
        assert_eq!(info.len(), headers::STANDARD.len());
        for header in headers::STANDARD {
            assert_eq!(info.get(header), Some(format!("value for {header}").as_str()));
        }
    }

    #[test]
    fn flags_become_bag_info_headers() {
        let args = Args::try_parse_from([
            "bagit",
            "--source-organization",
            "Library of Congress",
            "--contact-email",
            "ehs@pobox.com",
            "--processes",
            "4",
            "dir1",
            "dir2",
        ])
        .unwrap();

        assert_eq!(args.processes, 4);
        assert_eq!(args.directories, vec![PathBuf::from("dir1"), PathBuf::from("dir2")]);
        let info = args.bag_info.to_bag_info();
        assert_eq!(info.len(), 2);
        assert_eq!(info.get("Source-Organization"), Some("Library of Congress"));
        assert_eq!(info.get("Contact-Email"), Some("ehs@pobox.com"));
    }

    #[test]
    fn algorithms_default_to_md5() {
        let args = Args::try_parse_from(["bagit", "dir"]).unwrap();
        assert_eq!(args.algorithms(), vec![DigestAlg::Md5]);
        assert_eq!(args.processes, 1);
        assert!(!args.quiet);

        let args = Args::try_parse_from(["bagit", "--algorithm", "sha256", "--algorithm", "md5", "dir"]).unwrap();
        assert_eq!(args.algorithms(), vec![DigestAlg::Sha256, DigestAlg::Md5]);
    }

    #[test]
    fn directory_is_required() {
        assert!(Args::try_parse_from(["bagit"]).is_err());
        assert!(Args::try_parse_from(["bagit", "--algorithm", "crc32", "dir"]).is_err());
    }
}
