/// CSV 字段转义: 含逗号、双引号、换行的字段加引号, 内部双引号加倍
pub fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// 拼接一行 CSV (以 \n 结尾)
pub fn csv_row<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    let mut row = fields
        .into_iter()
        .map(escape_csv)
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}
