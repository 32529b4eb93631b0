use crate::commons::is_ws;

use super::frames::Reaped;
use super::step::Step;
use super::Extractor;

/// array 的元素不进入 path 栈，规则只按 object 的 key 匹配。
impl<'r, 'a, const DEPTH: usize> Extractor<'r, 'a, DEPTH> {
    pub(super) fn array(&mut self, c: Option<u8>) -> bool {
        if c == Some(b'[') {
            self.replace(Step::ArrayMaybeEmpty);
            return true;
        }

        self.fail();
        false
    }

    pub(super) fn array_maybe_empty(&mut self, c: Option<u8>) -> bool {
        match c {
            Some(c) if is_ws(c) => true,
            // 空 array
            Some(b']') => {
                self.close();
                true
            }
            None => {
                self.fail();
                false
            }
            Some(_) => {
                self.replace(Step::ArrayItem);
                self.push(Step::Value);
                false
            }
        }
    }

    pub(super) fn array_item(&mut self, c: Option<u8>) -> bool {
        if c.is_some_and(is_ws) {
            return true;
        }

        if let Reaped::Closed(..) = self.collect() {
            match c {
                Some(b',') => {
                    self.push(Step::Value);
                    return true;
                }
                Some(b']') => {
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
