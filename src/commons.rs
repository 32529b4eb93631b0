/// 阈值常量
pub mod limits {
    /// frame 池的默认容量，也就是 json 的最大嵌套深度(包含根节点的 frame)。
    pub const DEFAULT_DEPTH_LIMIT: usize = 16;

    /// 单个字符串(包括 object 的 key)最多能容纳的字节数。
    pub const MAX_STRING_SIZE: usize = 64;
}

/// json 中允许出现在 token 之间的空白字符
pub(crate) const fn is_ws(c: u8) -> bool {
    matches!(c, b' ' | b'\n' | b'\r' | b'\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ws() {
        assert!(is_ws(b' '));
        assert!(is_ws(b'\t'));
        assert!(is_ws(b'\r'));
        assert!(is_ws(b'\n'));
        assert!(!is_ws(b'\0'));
        assert!(!is_ws(b'x'));
    }
}
