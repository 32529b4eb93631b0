use crate::ExtractError;

use super::stack_frame::{Partial, ValueKind};
use super::step::Step;
use super::Extractor;

/// 数字的累加器
///
/// 整数部分和小数部分分开累加，不支持指数形式。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Number {
    negative: bool,
    magnitude: i64,
    fraction_digits: i32,
    fraction: f64,
}

impl Number {
    /// 整数部分追加一位，溢出时返回 None
    fn push_integer_digit(&mut self, digit: u8) -> Option<()> {
        self.magnitude = self
            .magnitude
            .checked_mul(10)?
            .checked_add((digit - b'0') as i64)?;
        Some(())
    }

    fn push_fraction_digit(&mut self, digit: u8) {
        self.fraction_digits += 1;
        self.fraction += (digit - b'0') as f64 / 10f64.powi(self.fraction_digits);
    }

    /// 带符号的整数部分
    pub fn integer(&self) -> i64 {
        if self.negative {
            -self.magnitude
        } else {
            self.magnitude
        }
    }

    /// 带符号的完整数值
    pub fn to_f64(&self) -> f64 {
        let value = self.magnitude as f64 + self.fraction;
        if self.negative {
            -value
        } else {
            value
        }
    }
}

impl<'r, 'a, const DEPTH: usize> Extractor<'r, 'a, DEPTH> {
    fn number_mut(&mut self) -> Option<&mut Number> {
        match &mut self.top_mut().value {
            Partial::Number(number) => Some(number),
            _ => None,
        }
    }

    pub(super) fn number(&mut self, c: Option<u8>) -> bool {
        let top = self.top_mut();
        top.set_kind(ValueKind::Integer);
        top.value = Partial::Number(Number::default());

        match c {
            None => {
                self.fail();
                false
            }
            Some(b'-') => {
                if let Some(number) = self.number_mut() {
                    number.negative = true;
                }
                self.replace(Step::NumberGotSign);
                true
            }
            Some(_) => {
                self.replace(Step::NumberGotSign);
                false
            }
        }
    }

    pub(super) fn number_got_sign(&mut self, c: Option<u8>) -> bool {
        match c {
            Some(b'0') => {
                self.replace(Step::NumberGotInteger);
                true
            }
            Some(b'1'..=b'9') => {
                self.replace(Step::NumberNonzeroInteger);
                false
            }
            // 符号后面必须是数字，包括输入结束在内的其它情况都失败
            _ => {
                self.fail();
                false
            }
        }
    }

    pub(super) fn number_nonzero_integer(&mut self, c: Option<u8>) -> bool {
        match c {
            Some(digit @ b'0'..=b'9') => {
                let position = self.position;
                let pushed = match self.number_mut() {
                    Some(number) => number.push_integer_digit(digit),
                    None => return self.payload_mismatch(),
                };
                if pushed.is_none() {
                    self.abort(ExtractError::IntegerOverflow(position));
                    return false;
                }
                true
            }
            // 至少已经有一位数字了，输入可以在这里结束
            None => {
                self.close();
                false
            }
            Some(_) => {
                self.replace(Step::NumberGotInteger);
                false
            }
        }
    }

    pub(super) fn number_got_integer(&mut self, c: Option<u8>) -> bool {
        if c == Some(b'.') {
            self.replace(Step::NumberFraction);
            return true;
        }

        self.close();
        false
    }

    pub(super) fn number_fraction(&mut self, c: Option<u8>) -> bool {
        let Some(number) = self.number_mut() else {
            return self.payload_mismatch();
        };

        match c {
            Some(digit @ b'0'..=b'9') => {
                number.push_fraction_digit(digit);
                true
            }
            // '.' 后面至少要有一位数字
            _ if number.fraction_digits > 0 => {
                self.close();
                false
            }
            _ => {
                self.fail();
                false
            }
        }
    }
}
