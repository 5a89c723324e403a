pub mod dates;

/// 取字符串开头的整数部分
///
/// 允许前导空白和一个正负号，之后遇到第一个非数字字符即停止：
/// `"30"` -> 30，`"14days"` -> 14，`"-3"` -> -3，`"abc"` / `""` -> None。
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let digits_start = usize::from(trimmed.starts_with(['-', '+']));
    let end = trimmed[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|i| i + digits_start)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<i64>().ok()
}
