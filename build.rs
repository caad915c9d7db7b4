// Stamps the build with the time the sources were last compiled.
// SOURCE_DATE_EPOCH wins when set, for reproducible builds.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let stamp = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .map(|utc| utc.with_timezone(&Local))
        .unwrap_or_else(Local::now);

    println!("cargo:rustc-env=PORTPROBE_BUILD_DATE={}", ctime(stamp));
}

fn ctime(stamp: DateTime<Local>) -> String {
    stamp.format("%a %b %e %H:%M:%S %Y").to_string()
}
