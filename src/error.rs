use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("did not parse at position '{0}' .")]
    Rejected(usize),

    #[error("json nesting depth limit exceeded over '{0}' frames.")]
    DepthExceeded(usize),

    #[error("string at position '{0}' exceeds the string buffer size.")]
    StringTooLong(usize),

    #[error("integer overflow in number at position '{0}' .")]
    IntegerOverflow(usize),

    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}

impl ExtractError {
    /// 是否是引擎自身的簿记错误(而不是输入不合法)
    pub fn is_internal(&self) -> bool {
        matches!(self, ExtractError::Internal(_))
    }
}

/// frame 栈的不变量被破坏，说明某个语法状态机有 bug .
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("frame isn't free")]
    FrameNotFree,

    #[error("frame isn't in use")]
    FrameNotInUse,

    #[error("frame isn't a zombie")]
    FrameNotZombie,

    #[error("frame stack is empty")]
    StackEmpty,

    #[error("frame pool exhausted")]
    PoolExhausted,

    #[error("path stack is full")]
    PathOverflow,

    #[error("path stack is empty")]
    PathUnderflow,

    #[error("frame holds an unexpected partial value")]
    PayloadMismatch,

    #[error("got an untyped value while matching rules")]
    UntypedValue,

    #[error("some parse step consumed the end of input")]
    EndOfInputConsumed,

    #[error("length not decreasing while draining")]
    LengthNotDecreasing,

    #[error("first frame isn't a zombie")]
    RootNotZombie,
}
