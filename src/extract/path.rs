use arrayvec::ArrayVec;

use crate::commons::limits::MAX_STRING_SIZE;
use crate::InternalError;

/// 从根节点到当前正在解析的值所经过的 object key
pub(crate) struct PathStack<const DEPTH: usize> {
    keys: [ArrayVec<u8, MAX_STRING_SIZE>; DEPTH],
    len: usize,
}

impl<const DEPTH: usize> PathStack<DEPTH> {
    pub fn new() -> Self {
        Self {
            keys: std::array::from_fn(|_| ArrayVec::new()),
            len: 0,
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn push(&mut self, key: ArrayVec<u8, MAX_STRING_SIZE>) -> Result<(), InternalError> {
        let Some(slot) = self.keys.get_mut(self.len) else {
            return Err(InternalError::PathOverflow);
        };

        *slot = key;
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<(), InternalError> {
        if self.len == 0 {
            return Err(InternalError::PathUnderflow);
        }

        self.len -= 1;
        Ok(())
    }

    /// 路径必须完全相同: 长度相同，且每一级 key 逐字节相等
    pub fn matches(&self, path: &[&str]) -> bool {
        path.len() == self.len
            && self.keys[..self.len]
                .iter()
                .zip(path)
                .all(|(key, expected)| key.as_slice() == expected.as_bytes())
    }
}

impl<const DEPTH: usize> std::fmt::Debug for PathStack<DEPTH> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.keys[..self.len].iter().map(|key| String::from_utf8_lossy(key)))
            .finish()
    }
}
