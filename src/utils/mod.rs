pub mod fingerprint;
pub mod urls;

pub use fingerprint::request_fingerprint;
pub use urls::parse_base_url;
