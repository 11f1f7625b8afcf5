use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$",
    )
    .expect("email regex")
});

/// 清理单行文本输入: 去掉 HTML 标签与控制字符, 合并连续空白, 去首尾空白
pub fn sanitize_text_field(raw: &str) -> String {
    let stripped: String = TAG_RE
        .replace_all(raw, "")
        .chars()
        .filter(|c| c.is_whitespace() || !c.is_control())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 规范化邮箱: 去空白与控制字符并转小写 (不校验格式)
pub fn sanitize_email(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_lowercase()
}

/// 邮箱格式校验 (只看形状, 不校验能否投递)
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_RE.is_match(email)
}
