use crate::commons::is_ws;

use super::frames::Reaped;
use super::stack_frame::{Partial, ValueKind};
use super::step::Step;
use super::Extractor;

impl<'r, 'a, const DEPTH: usize> Extractor<'r, 'a, DEPTH> {
    pub(super) fn object(&mut self, c: Option<u8>) -> bool {
        if c == Some(b'{') {
            self.replace(Step::ObjectMaybeEmpty);
            return true;
        }

        self.fail();
        false
    }

    pub(super) fn object_maybe_empty(&mut self, c: Option<u8>) -> bool {
        match c {
            Some(c) if is_ws(c) => true,
            // 空 object
            Some(b'}') => {
                self.close();
                true
            }
            None => {
                self.fail();
                false
            }
            Some(_) => {
                self.replace(Step::ObjectKey);
                false
            }
        }
    }

    pub(super) fn object_key(&mut self, c: Option<u8>) -> bool {
        if c.is_some_and(is_ws) {
            return true;
        }

        self.replace(Step::ObjectColon);
        self.push(Step::Str);
        false
    }

    /// key 解析完，遇到 ':' 后把 key 压入 path 栈，然后解析 value
    pub(super) fn object_colon(&mut self, c: Option<u8>) -> bool {
        if c.is_some_and(is_ws) {
            return true;
        }

        if let (Reaped::Closed(_, Partial::Str(key)), Some(b':')) = (self.collect(), c) {
            if let Err(err) = self.paths.push(key) {
                self.raise(err);
                return false;
            }

            self.replace(Step::ObjectValue);
            self.push(Step::Value);
            return true;
        }

        self.fail();
        false
    }

    /// value 解析完，先匹配规则，再弹出 path，然后是 ',' 或 '}'
    pub(super) fn object_value(&mut self, c: Option<u8>) -> bool {
        if c.is_some_and(is_ws) {
            return true;
        }

        let reaped = self.collect();
        if let Reaped::Invalid = reaped {
            return false;
        }

        if let Reaped::Closed(kind, value) = &reaped {
            if *kind != ValueKind::None {
                self.match_rules(*kind, value);
            }
        }

        // 去掉最后一级 path
        if let Err(err) = self.paths.pop() {
            self.raise(err);
            return false;
        }

        if let Reaped::Closed(..) = reaped {
            match c {
                Some(b',') => {
                    self.replace(Step::ObjectKey);
                    return true;
                }
                Some(b'}') => {
                    self.close();
                    return true;
                }
                _ => (),
            }
        }

        self.fail();
        false
    }
}
