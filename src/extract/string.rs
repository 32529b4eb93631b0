use arrayvec::ArrayVec;

use crate::ExtractError;

use super::stack_frame::{Partial, ValueKind};
use super::step::Step;
use super::Extractor;

impl<'r, 'a, const DEPTH: usize> Extractor<'r, 'a, DEPTH> {
    /// 字符串必须以 '"' 开头，否则在不吃掉字符的情况下失败
    pub(super) fn string(&mut self, c: Option<u8>) -> bool {
        let top = self.top_mut();
        top.set_kind(ValueKind::Str);
        top.value = Partial::Str(ArrayVec::new());

        if c == Some(b'"') {
            self.replace(Step::StrContents);
            return true;
        }

        self.fail();
        false
    }

    /// 原样收集字节直到下一个 '"' ，不处理转义。
    pub(super) fn string_contents(&mut self, c: Option<u8>) -> bool {
        match c {
            Some(b'"') => {
                self.close();
                true
            }
            None => {
                self.fail();
                false
            }
            Some(c) => {
                let position = self.position;
                let Partial::Str(buffer) = &mut self.top_mut().value else {
                    return self.payload_mismatch();
                };

                if buffer.try_push(c).is_err() {
                    self.abort(ExtractError::StringTooLong(position));
                    return false;
                }
                true
            }
        }
    }
}
