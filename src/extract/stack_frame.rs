use std::fmt;

use arrayvec::ArrayVec;
use bitfields::bitfield;

use crate::commons::limits::MAX_STRING_SIZE;

use super::number::Number;
use super::step::{Keyword, Step};

/// frame 的生命周期: Free -> InUse -> Zombie -> Free
#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FrameStatus {
    /// 空闲，可以被 push 复用
    Free = 0,
    /// 正在解析
    InUse,
    /// 已经结束(成功或失败)，等待父节点 collect
    Zombie,
}

impl FrameStatus {
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Self::InUse,
            2 => Self::Zombie,
            _ => Self::Free,
        }
    }

    pub const fn into_bits(self) -> u8 {
        self as u8
    }
}

/// frame 解析完成后代表的值类型
#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ValueKind {
    /// object / array 这类结构性的 frame，以及 null
    None = 0,
    /// 数字
    Integer,
    /// 字符串
    Str,
    /// true 或 false
    Bool,
}

impl ValueKind {
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Self::Integer,
            2 => Self::Str,
            3 => Self::Bool,
            _ => Self::None,
        }
    }

    pub const fn into_bits(self) -> u8 {
        self as u8
    }
}

/// frame 的状态位
#[bitfield(u8)]
#[derive(Clone, Copy)]
pub(crate) struct FrameHeader {
    #[bits(2)]
    status: FrameStatus,

    #[bits(4)]
    kind: ValueKind,

    /// 进入 Zombie 时是 close(true) 还是 fail(false)
    #[bits(1)]
    complete: bool,

    /// 这个 frame 是否已经吃掉过输入字符。
    /// 吃过字符之后再失败，父节点就不能再拿同一个字符去尝试下一个候选了。
    #[bits(1)]
    consumed: bool,
}

/// 正在构建中的值
#[derive(Debug, Clone, Default)]
pub(crate) enum Partial {
    #[default]
    Empty,
    Literal { keyword: Keyword, offset: usize },
    Number(Number),
    Str(ArrayVec<u8, MAX_STRING_SIZE>),
    Bool(bool),
}

/// 一次语法结构的激活记录
#[derive(Clone)]
pub(crate) struct Frame {
    header: FrameHeader,

    /// 下一个输入字符交给哪个状态处理
    pub step: Step,

    pub value: Partial,
}

impl Frame {
    pub fn free() -> Self {
        Self {
            header: FrameHeader::new(),
            step: Step::Value,
            value: Partial::Empty,
        }
    }

    pub fn status(&self) -> FrameStatus {
        self.header.status()
    }

    pub fn kind(&self) -> ValueKind {
        self.header.kind()
    }

    pub fn set_kind(&mut self, kind: ValueKind) {
        self.header.set_kind(kind);
    }

    pub fn is_complete(&self) -> bool {
        self.header.complete()
    }

    pub fn consumed(&self) -> bool {
        self.header.consumed()
    }

    pub fn mark_consumed(&mut self) {
        self.header.set_consumed(true);
    }

    /// Free -> InUse
    pub fn claim(&mut self, step: Step) {
        self.header = FrameHeaderBuilder::new()
            .with_status(FrameStatus::InUse)
            .with_kind(ValueKind::None)
            .build();
        self.step = step;
        self.value = Partial::Empty;
    }

    /// InUse -> Zombie
    pub fn retire(&mut self, success: bool) {
        self.header.set_status(FrameStatus::Zombie);
        self.header.set_complete(success);
    }

    /// Zombie -> Free, 取走结果
    pub fn release(&mut self) -> (ValueKind, Partial) {
        self.header.set_status(FrameStatus::Free);
        (self.kind(), std::mem::take(&mut self.value))
    }

    pub fn reset(&mut self) {
        self.header = FrameHeader::new();
        self.value = Partial::Empty;
    }

    /// 把子节点的结果当作自己的值
    pub fn adopt(&mut self, kind: ValueKind, value: Partial) {
        self.set_kind(kind);
        self.value = value;
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("status", &self.status())
            .field("step", &self.step)
            .field("kind", &self.kind())
            .field("complete", &self.is_complete())
            .field("consumed", &self.consumed())
            .field("value", &self.value)
            .finish()
    }
}
