use crate::commons::is_ws;

use super::frames::Reaped;
use super::stack_frame::Partial;
use super::step::{Keyword, Step};
use super::Extractor;

impl<'r, 'a, const DEPTH: usize> Extractor<'r, 'a, DEPTH> {
    /// 任意 json 值的入口，先跳过空白，然后从 string 开始尝试候选链
    pub(super) fn value(&mut self, c: Option<u8>) -> bool {
        if c.is_some_and(is_ws) {
            return true;
        }

        self.replace(Step::ValueMaybeString);
        self.push(Step::Str);
        false
    }

    /// 收下刚结束的候选的结果。
    ///
    /// 候选成功就把它的值当作自己的值并 close；
    /// 候选在没吃掉任何字符时失败，就用同一个字符尝试下一个候选；
    /// 吃掉过字符后才失败的候选不能再回退，直接 fail 。
    pub(super) fn value_maybe(&mut self, step: Step) -> bool {
        match self.collect() {
            Reaped::Closed(kind, value) => {
                self.top_mut().adopt(kind, value);
                self.close();
            }
            Reaped::Mismatched => match step.next_candidate() {
                Some((next, candidate)) => {
                    self.replace(next);
                    self.push(candidate);
                }
                None => self.fail(),
            },
            Reaped::Failed | Reaped::Invalid => self.fail(),
        }
        false
    }

    pub(super) fn keyword(&mut self, keyword: Keyword) -> bool {
        let top = self.top_mut();
        top.set_kind(keyword.kind());
        top.value = Partial::Literal { keyword, offset: 0 };

        self.replace(Step::Literal);
        false
    }

    /// 逐个字符匹配 true / false / null
    pub(super) fn literal(&mut self, c: Option<u8>) -> bool {
        let Partial::Literal { keyword, offset } = &mut self.top_mut().value else {
            return self.payload_mismatch();
        };

        let text = keyword.text();
        if c.is_none() || c != text.get(*offset).copied() {
            self.fail();
            return false;
        }

        *offset += 1;
        if *offset == text.len() {
            let keyword = *keyword;
            if keyword != Keyword::Null {
                self.top_mut().value = Partial::Bool(keyword == Keyword::True);
            }
            self.close();
        }
        true
    }
}
