/// BagIt version written into the declaration file.
pub const BAGIT_VERSION: &str = "0.96";
/// Character encoding declared for every tag file.
pub const TAG_FILE_ENCODING: &str = "UTF-8";

/// Name of the payload subdirectory inside a bag.
pub const PAYLOAD_DIR: &str = "data";
/// Declaration file name.
pub const BAGIT_TXT: &str = "bagit.txt";
/// Free-form metadata file name.
pub const BAG_INFO_TXT: &str = "bag-info.txt";
/// Manifest file prefix, completed by `<alg>.txt`.
pub const MANIFEST_PREFIX: &str = "manifest-";

/// Defaults when Option<T> is None
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024; // 16 KiB
/// Read chunk sizes the digest worker is tuned for (in bytes)
pub const ALLOWED_CHUNK_SIZES: &[usize] = &[
    16 * 1024,   // 16 KiB
    32 * 1024,   // 32 KiB
    64 * 1024,   // 64 KiB
    128 * 1024,  // 128 KiB
    256 * 1024,  // 256 KiB
    1024 * 1024, // 1 MiB
];
/// Max chunk size sanity bound (8 MiB).
pub const MAX_CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// Job queue depth per digest worker.
pub const JOBS_PER_WORKER: usize = 4;

/// Header names understood by `bag-info.txt`.
pub mod headers {
    pub const SOURCE_ORGANIZATION: &str = "Source-Organization";
    pub const ORGANIZATION_ADDRESS: &str = "Organization-Address";
    pub const CONTACT_NAME: &str = "Contact-Name";
    pub const CONTACT_PHONE: &str = "Contact-Phone";
    pub const CONTACT_EMAIL: &str = "Contact-Email";
    pub const EXTERNAL_DESCRIPTION: &str = "External-Description";
    pub const EXTERNAL_IDENTIFIER: &str = "External-Identifier";
    pub const BAG_SIZE: &str = "Bag-Size";
    pub const BAG_GROUP_IDENTIFIER: &str = "Bag-Group-Identifier";
    pub const BAG_COUNT: &str = "Bag-Count";
    pub const INTERNAL_SENDER_IDENTIFIER: &str = "Internal-Sender-Identifier";
    pub const INTERNAL_SENDER_DESCRIPTION: &str = "Internal-Sender-Description";

    // Always generated, never taken from the caller.
    pub const BAGGING_DATE: &str = "Bagging-Date";
    pub const PAYLOAD_OXUM: &str = "Payload-Oxum";

    /// Caller-suppliable headers, in the order they are documented.
    pub const STANDARD: &[&str] = &[
        SOURCE_ORGANIZATION,
        ORGANIZATION_ADDRESS,
        CONTACT_NAME,
        CONTACT_PHONE,
        CONTACT_EMAIL,
        EXTERNAL_DESCRIPTION,
        EXTERNAL_IDENTIFIER,
        BAG_SIZE,
        BAG_GROUP_IDENTIFIER,
        BAG_COUNT,
        INTERNAL_SENDER_IDENTIFIER,
        INTERNAL_SENDER_DESCRIPTION,
    ];
}
