//! Output file naming
//!
//! Device uploads are named `GT_<site>_<date>_<time>.txt` or
//! `WB_<site>_<date>_<time>.txt`; offline dumps are named
//! `Fault_GT_<site>.txt` or `Fault_WBVF_<site>.txt`. Generated names follow
//! the same scheme so outputs can be fed back in.

use chrono::NaiveDateTime;
use fdc_shared::DeviceClass;

/// Suffix format for generated names (`yymmdd_HHMMSS`).
pub const TIMESTAMP_FORMAT: &str = "%y%m%d_%H%M%S";

/// The `index`-th `_`-separated field, without a `.txt` extension.
fn name_field(file_name: &str, index: usize) -> Option<&str> {
    file_name
        .split('_')
        .nth(index)
        .map(|field| field.trim_end_matches(".txt"))
        .filter(|field| !field.is_empty())
}

/// Offline name for a converted online upload.
///
/// `GT_N24987L02_260107_091837.txt` → `Fault_GT_N24987L02.txt`
pub fn offline_name_for_online(file_name: &str) -> String {
    let prefix = if file_name.starts_with("GT_") {
        Some("Fault_GT")
    } else if file_name.starts_with("WB_") {
        Some("Fault_WBVF")
    } else {
        None
    };

    match (prefix, name_field(file_name, 1)) {
        (Some(prefix), Some(site)) => format!("{}_{}.txt", prefix, site),
        _ => "Fault_Converted.txt".to_string(),
    }
}

/// Online name for a converted offline dump.
///
/// `Fault_WBVF_S100.txt` → `WB_FULL_S100_<timestamp>.txt`
pub fn online_name_for_offline(file_name: &str, now: NaiveDateTime) -> String {
    let stamp = now.format(TIMESTAMP_FORMAT);
    let prefix = if file_name.contains("WBVF") {
        Some("WB")
    } else if file_name.contains("GT") {
        Some("GT")
    } else {
        None
    };

    match (prefix, name_field(file_name, 2)) {
        (Some(prefix), Some(site)) => format!("{}_FULL_{}_{}.txt", prefix, site, stamp),
        _ => format!("Online_FULL_Converted_{}.txt", stamp),
    }
}

/// Name for a merge written as online text.
pub fn merged_online_name(now: NaiveDateTime) -> String {
    format!("Merged_Online_{}.txt", now.format(TIMESTAMP_FORMAT))
}

/// Name for a merge written as an offline dump.
pub fn merged_offline_name(device: DeviceClass, now: NaiveDateTime) -> String {
    let prefix = match device {
        DeviceClass::Gt => "Fault_GT",
        DeviceClass::Wbvf => "Fault_WBVF",
    };
    format!("{}_Merged_{}.txt", prefix, now.format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 7)
            .unwrap()
            .and_hms_opt(9, 18, 37)
            .unwrap()
    }

    #[test]
    fn test_offline_name_for_online() {
        assert_eq!(
            offline_name_for_online("GT_N24987L02_260107_091837.txt"),
            "Fault_GT_N24987L02.txt"
        );
        assert_eq!(
            offline_name_for_online("WB_S100_260107_091837.txt"),
            "Fault_WBVF_S100.txt"
        );
        assert_eq!(offline_name_for_online("GT_N24987L02.txt"), "Fault_GT_N24987L02.txt");
        assert_eq!(offline_name_for_online("upload.txt"), "Fault_Converted.txt");
        assert_eq!(offline_name_for_online("GT_"), "Fault_Converted.txt");
    }

    #[test]
    fn test_online_name_for_offline() {
        assert_eq!(
            online_name_for_offline("Fault_WBVF_S100.txt", now()),
            "WB_FULL_S100_260107_091837.txt"
        );
        assert_eq!(
            online_name_for_offline("Fault_GT_N24987L02.txt", now()),
            "GT_FULL_N24987L02_260107_091837.txt"
        );
        assert_eq!(
            online_name_for_offline("dump.bin", now()),
            "Online_FULL_Converted_260107_091837.txt"
        );
        // GT named, but no site field.
        assert_eq!(
            online_name_for_offline("GT.bin", now()),
            "Online_FULL_Converted_260107_091837.txt"
        );
    }

    #[test]
    fn test_merged_names() {
        assert_eq!(merged_online_name(now()), "Merged_Online_260107_091837.txt");
        assert_eq!(
            merged_offline_name(DeviceClass::Gt, now()),
            "Fault_GT_Merged_260107_091837.txt"
        );
        assert_eq!(
            merged_offline_name(DeviceClass::Wbvf, now()),
            "Fault_WBVF_Merged_260107_091837.txt"
        );
    }
}
