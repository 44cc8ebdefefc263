//! Shared test constants and helpers for integration tests.

use gbt_refs::Record;

/// A small Web of Science style CSV export: two Latin records and one CJK record.
///
/// Column names follow the WoS "Excel/CSV" export, so every field resolves
/// through its first synonym.
pub const WOS_CSV: &str = "\
Publication Type,Authors,Article Title,Source Title,Publication Year,Volume,Issue,Pages,DOI
J,\"Smith, J; Lee, K\",A Study,J. Test,2020,5,,10-20,
J,\"Doe, John A.; Roe, R; Poe, E; Moe, M\",Second Study,Ann. Phys.,2021,7,1,pp. 3-9,10.1000/xyz
J,张三; 李四,中文标题,测试学报,2018,8,2,33-40,
";

/// The lines [`WOS_CSV`] formats to with the default options.
pub const WOS_CSV_EXPECTED: [&str; 3] = [
    "[1] Smith J, Lee K. A Study[J] J. Test, 2020, 5:10-20.",
    "[2] Doe J A, Roe R, Poe E, et al. Second Study[J] Ann. Phys., 2021, 7(1):3-9. doi:10.1000/xyz.",
    "[3] 张三,李四. 中文标题[J] 测试学报, 2018, 8(2):33-40.",
];

/// Build a record from `(field, value)` pairs.
#[allow(dead_code)]
pub fn record(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().copied().collect()
}
