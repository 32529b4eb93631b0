use arrayvec::ArrayVec;
use tracing::debug;

use crate::commons::limits::MAX_STRING_SIZE;
use crate::InternalError;

use super::path::PathStack;
use super::stack_frame::{Partial, ValueKind};
use super::Extractor;

/// 字符串的输出槽
pub type StrSlot = ArrayVec<u8, MAX_STRING_SIZE>;

/// 提取出来的值写到调用方的哪块内存里
#[derive(Debug)]
pub enum Slot<'a> {
    /// 数字的整数部分(带符号)
    Integer(&'a mut i64),
    /// 完整的数字，包括小数部分
    Float(&'a mut f64),
    Str(&'a mut StrSlot),
    Bool(&'a mut bool),
}

impl Slot<'_> {
    /// 这个槽接收的值类型
    pub fn kind(&self) -> ValueKind {
        match self {
            Slot::Integer(_) | Slot::Float(_) => ValueKind::Integer,
            Slot::Str(_) => ValueKind::Str,
            Slot::Bool(_) => ValueKind::Bool,
        }
    }
}

/// 一条提取规则: 在 `path` 处找到 `slot` 类型的值时，把它写进 `slot` 。
#[derive(Debug)]
pub struct Rule<'a> {
    slot: Slot<'a>,
    path: &'a [&'a str],
    found: bool,
}

impl<'a> Rule<'a> {
    pub fn new(slot: Slot<'a>, path: &'a [&'a str]) -> Self {
        Self {
            slot,
            path,
            found: false,
        }
    }

    pub fn integer(slot: &'a mut i64, path: &'a [&'a str]) -> Self {
        Self::new(Slot::Integer(slot), path)
    }

    pub fn float(slot: &'a mut f64, path: &'a [&'a str]) -> Self {
        Self::new(Slot::Float(slot), path)
    }

    pub fn string(slot: &'a mut StrSlot, path: &'a [&'a str]) -> Self {
        Self::new(Slot::Str(slot), path)
    }

    pub fn boolean(slot: &'a mut bool, path: &'a [&'a str]) -> Self {
        Self::new(Slot::Bool(slot), path)
    }

    pub fn kind(&self) -> ValueKind {
        self.slot.kind()
    }

    pub fn path(&self) -> &'a [&'a str] {
        self.path
    }

    /// 本次解析中是否写入过 slot
    pub fn found(&self) -> bool {
        self.found
    }

    pub(crate) fn reset(&mut self) {
        self.found = false;
    }

    pub(crate) fn matches<const DEPTH: usize>(&self, kind: ValueKind, paths: &PathStack<DEPTH>) -> bool {
        self.kind() == kind && paths.matches(self.path)
    }

    /// 按 slot 的类型转换并写入
    pub(crate) fn store(&mut self, value: &Partial) -> Result<(), InternalError> {
        match (&mut self.slot, value) {
            (Slot::Integer(slot), Partial::Number(number)) => **slot = number.integer(),
            (Slot::Float(slot), Partial::Number(number)) => **slot = number.to_f64(),
            (Slot::Str(slot), Partial::Str(s)) => {
                slot.clear();
                // 两边容量相同，不会截断
                let len = s.len().min(slot.capacity());
                slot.extend(s[..len].iter().copied());
            }
            (Slot::Bool(slot), Partial::Bool(b)) => **slot = *b,
            _ => return Err(InternalError::UntypedValue),
        }

        self.found = true;
        Ok(())
    }
}

impl<'r, 'a, const DEPTH: usize> Extractor<'r, 'a, DEPTH> {
    /// 刚完成的值和当前 path 匹配规则表，只有第一条匹配的规则会被写入。
    pub(super) fn match_rules(&mut self, kind: ValueKind, value: &Partial) {
        let Some(rule) = self
            .rules
            .iter_mut()
            .find(|rule| rule.matches(kind, &self.paths))
        else {
            return;
        };

        debug!(path = ?self.paths, ?kind, "rule matched");
        if let Err(err) = rule.store(value) {
            self.raise(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_kind() {
        let mut i = 0;
        let mut f = 0.0;
        let mut s = StrSlot::new();
        let mut b = false;

        assert_eq!(ValueKind::Integer, Rule::integer(&mut i, &["a"]).kind());
        assert_eq!(ValueKind::Integer, Rule::float(&mut f, &["a"]).kind());
        assert_eq!(ValueKind::Str, Rule::string(&mut s, &["a"]).kind());
        assert_eq!(ValueKind::Bool, Rule::boolean(&mut b, &["a"]).kind());
    }

    #[test]
    fn test_store_string() {
        let mut s = StrSlot::new();
        s.extend(b"stale".iter().copied());

        let mut rule = Rule::string(&mut s, &["k"]);
        let value = Partial::Str(ArrayVec::try_from(&b"v1"[..]).unwrap());
        rule.store(&value).unwrap();
        assert!(rule.found());

        drop(rule);
        assert_eq!(b"v1", s.as_slice());
    }

    #[test]
    fn test_store_type_mismatch() {
        let mut b = false;
        let mut rule = Rule::boolean(&mut b, &["k"]);
        assert_eq!(Err(InternalError::UntypedValue), rule.store(&Partial::Empty));
        assert!(!rule.found());
    }
}
