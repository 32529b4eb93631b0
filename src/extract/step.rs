use super::stack_frame::ValueKind;

/// frame 的 continuation: 这个 frame 收到下一个字符时该执行的状态。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Step {
    Value,
    ValueMaybeString,
    ValueMaybeNumber,
    ValueMaybeObject,
    ValueMaybeArray,
    ValueMaybeTrue,
    ValueMaybeFalse,
    ValueMaybeNull,

    Keyword(Keyword),
    Literal,

    Str,
    StrContents,

    Number,
    NumberGotSign,
    NumberNonzeroInteger,
    NumberGotInteger,
    NumberFraction,

    Object,
    ObjectMaybeEmpty,
    ObjectKey,
    ObjectColon,
    ObjectValue,

    Array,
    ArrayMaybeEmpty,
    ArrayItem,
}

impl Step {
    /// value 的候选链。
    /// 返回 (当前候选失败后父 frame 切换到的状态, 下一个要尝试的候选)，
    /// 最后一个候选失败后返回 None 。
    pub fn next_candidate(self) -> Option<(Step, Step)> {
        match self {
            Step::ValueMaybeString => Some((Step::ValueMaybeNumber, Step::Number)),
            Step::ValueMaybeNumber => Some((Step::ValueMaybeObject, Step::Object)),
            Step::ValueMaybeObject => Some((Step::ValueMaybeArray, Step::Array)),
            Step::ValueMaybeArray => Some((Step::ValueMaybeTrue, Step::Keyword(Keyword::True))),
            Step::ValueMaybeTrue => Some((Step::ValueMaybeFalse, Step::Keyword(Keyword::False))),
            Step::ValueMaybeFalse => Some((Step::ValueMaybeNull, Step::Keyword(Keyword::Null))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Keyword {
    True,
    False,
    Null,
}

impl Keyword {
    pub const fn text(self) -> &'static [u8] {
        match self {
            Keyword::True => b"true",
            Keyword::False => b"false",
            Keyword::Null => b"null",
        }
    }

    pub const fn kind(self) -> ValueKind {
        match self {
            Keyword::True | Keyword::False => ValueKind::Bool,
            Keyword::Null => ValueKind::None,
        }
    }
}
