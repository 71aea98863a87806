//! Jenkins job-configuration XML codec
//!
//! Pure, stateless translators between the domain objects in
//! [`crate::pipeline`] and Jenkins' per-job XML configuration documents.
//! The document codecs in [`flow`](self) and `multibranch` assemble the two
//! root shapes; the sub-codecs below are composed by them and never call
//! back up.

pub mod cron;
pub mod enums;
pub mod params;
pub mod scm;
pub mod tree;
pub mod triggers;

mod flow;
mod multibranch;

pub use cron::millis_to_crontab;
pub use enums::{
    BitbucketPrDiscoverTrust, GithubPrDiscoverTrust, PrDiscoverTrust, kind_for_long_name,
    long_name_for,
};
pub use flow::{decode_single_pipeline, encode_single_pipeline, update_single_pipeline};
pub use multibranch::{
    decode_multibranch_pipeline, encode_multibranch_pipeline, update_multibranch_pipeline,
};
pub use tree::{Document, Element, replace_xml_version};
