// src/exec/command.rs

use crate::types::InvocationRequest;

pub const LOCALE_FLAG: &str = "--locale";
pub const BUCKET_FLAG: &str = "--bucket";

/// Argument list for one invocation: `base` followed by the filters that are
/// actually set.
///
/// Each value is its own argv entry; nothing goes through a shell.
pub fn build_args(base: &[String], request: &InvocationRequest) -> Vec<String> {
    let mut args = base.to_vec();

    if let Some(locale) = &request.locale {
        args.push(LOCALE_FLAG.to_string());
        args.push(locale.clone());
    }
    if let Some(bucket) = &request.bucket {
        args.push(BUCKET_FLAG.to_string());
        args.push(bucket.clone());
    }

    args
}
