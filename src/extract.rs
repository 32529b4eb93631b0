mod array;
mod frames;
mod number;
mod object;
mod path;
mod rule;
mod stack_frame;
mod step;
mod string;
mod value;

use bytes::Buf;
use tracing::{debug, trace};

use crate::commons::{is_ws, limits::DEFAULT_DEPTH_LIMIT};
use crate::{ExtractError, ExtractResult, InternalError};

use path::PathStack;
use stack_frame::{Frame, FrameStatus};
use step::Step;

pub use rule::{Rule, Slot, StrSlot};
pub use stack_frame::ValueKind;

/// 增量式的 json 提取器
///
/// 每次喂入一个字节，用一个固定容量的 frame 栈代替递归调用，
/// 在不构建解析树的情况下，把 `rules` 指定路径上的值写进调用方的 slot 。
/// 解析过程中不做任何堆分配。
///
/// `DEPTH` 是 frame 池的容量，也就是最大嵌套深度。
pub struct Extractor<'r, 'a, const DEPTH: usize = DEFAULT_DEPTH_LIMIT> {
    frames: [Frame; DEPTH],

    /// 正在使用的 frame 数量，栈顶是 frames[frames_len - 1]
    frames_len: usize,

    paths: PathStack<DEPTH>,

    rules: &'r mut [Rule<'a>],

    /// 粘滞错误，一旦记下，之后的 feed 和 finish 都直接返回它
    error: Option<ExtractError>,

    /// 已经喂入的字节数
    position: usize,
}

impl<'r, 'a> Extractor<'r, 'a> {
    pub fn new(rules: &'r mut [Rule<'a>]) -> Self {
        Self::with_depth(rules)
    }
}

impl<'r, 'a, const DEPTH: usize> Extractor<'r, 'a, DEPTH> {
    pub fn with_depth(rules: &'r mut [Rule<'a>]) -> Self {
        assert!(DEPTH > 0, "frame pool needs room for the root frame");

        let mut extractor = Self {
            frames: std::array::from_fn(|_| Frame::free()),
            frames_len: 0,
            paths: PathStack::new(),
            rules,
            error: None,
            position: 0,
        };
        extractor.init();
        extractor
    }

    /// 绑定新的规则表，重新开始解析。和之前的解析结果无关。
    pub fn reset(&mut self, rules: &'r mut [Rule<'a>]) {
        self.rules = rules;
        self.init();
    }

    fn init(&mut self) {
        for frame in self.frames.iter_mut() {
            frame.reset();
        }
        // 根 frame 代表整个文档的值
        self.frames[0].claim(Step::Value);
        self.frames_len = 1;

        self.paths.clear();
        for rule in self.rules.iter_mut() {
            rule.reset();
        }

        self.error = None;
        self.position = 0;
    }

    pub fn rules(&self) -> &[Rule<'a>] {
        &*self.rules
    }

    /// 已经喂入的字节数
    pub fn position(&self) -> usize {
        self.position
    }

    /// 当前的嵌套深度(正在使用的 frame 数量)
    pub fn depth(&self) -> usize {
        self.frames_len
    }

    /// 喂入一个字节。
    ///
    /// 返回错误后这个 Extractor 就不能再用了，之后的调用都返回同一个错误，直到 [`reset`](Self::reset)。
    pub fn feed(&mut self, c: u8) -> ExtractResult<()> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let consumed = self.dispatch(Some(c));
        let position = self.position;
        self.position += 1;

        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        // 根节点解析完之后只允许出现空白
        if consumed || (is_ws(c) && self.root_complete()) {
            return Ok(());
        }

        debug!(position, byte = c, "rejected");
        let err = ExtractError::Rejected(position);
        self.error = Some(err.clone());
        Err(err)
    }

    pub fn feed_slice(&mut self, input: &[u8]) -> ExtractResult<()> {
        for &c in input {
            self.feed(c)?;
        }
        Ok(())
    }

    /// 喂入任意 [`Buf`] 中剩余的全部字节
    pub fn feed_buf<B: Buf>(&mut self, mut buf: B) -> ExtractResult<()> {
        while buf.has_remaining() {
            self.feed(buf.get_u8())?;
        }
        Ok(())
    }

    /// 输入结束，排空 frame 栈并返回最终结果。
    pub fn finish(&mut self) -> ExtractResult<()> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        // 每个状态收到输入结束时都必须 close 或 fail ，所以 frame 数量只会减少
        while self.frames_len > 0 {
            let old_len = self.frames_len;
            if self.dispatch(None) {
                self.raise(InternalError::EndOfInputConsumed);
            } else if self.error.is_none() && self.frames_len >= old_len {
                self.raise(InternalError::LengthNotDecreasing);
            }

            if let Some(err) = &self.error {
                return Err(err.clone());
            }
        }

        // init 放进去的根 frame 没有人 collect ，它留下的 zombie 就是最终结果
        let root = &self.frames[0];
        if root.status() != FrameStatus::Zombie {
            self.raise(InternalError::RootNotZombie);
        } else if !root.is_complete() {
            self.error = Some(ExtractError::Rejected(self.position));
        }

        match &self.error {
            Some(err) => {
                debug!(%err, "did not parse");
                Err(err.clone())
            }
            None => {
                debug!(position = self.position, "parsed");
                Ok(())
            }
        }
    }

    fn root_complete(&self) -> bool {
        self.frames_len == 0
            && self.frames[0].status() == FrameStatus::Zombie
            && self.frames[0].is_complete()
    }

    /// 把同一个字符交给栈顶的 frame ，直到某个 frame 吃掉它，或者栈被清空。
    fn dispatch(&mut self, c: Option<u8>) -> bool {
        while self.frames_len > 0 && self.error.is_none() {
            if self.step(c) {
                return true;
            }
        }
        false
    }

    fn step(&mut self, c: Option<u8>) -> bool {
        let top = self.frames_len - 1;
        let step = self.frames[top].step;
        trace!(depth = self.frames_len, ?step, byte = ?c, "step");

        let consumed = match step {
            Step::Value => self.value(c),
            Step::ValueMaybeString
            | Step::ValueMaybeNumber
            | Step::ValueMaybeObject
            | Step::ValueMaybeArray
            | Step::ValueMaybeTrue
            | Step::ValueMaybeFalse
            | Step::ValueMaybeNull => self.value_maybe(step),

            Step::Keyword(keyword) => self.keyword(keyword),
            Step::Literal => self.literal(c),

            Step::Str => self.string(c),
            Step::StrContents => self.string_contents(c),

            Step::Number => self.number(c),
            Step::NumberGotSign => self.number_got_sign(c),
            Step::NumberNonzeroInteger => self.number_nonzero_integer(c),
            Step::NumberGotInteger => self.number_got_integer(c),
            Step::NumberFraction => self.number_fraction(c),

            Step::Object => self.object(c),
            Step::ObjectMaybeEmpty => self.object_maybe_empty(c),
            Step::ObjectKey => self.object_key(c),
            Step::ObjectColon => self.object_colon(c),
            Step::ObjectValue => self.object_value(c),

            Step::Array => self.array(c),
            Step::ArrayMaybeEmpty => self.array_maybe_empty(c),
            Step::ArrayItem => self.array_item(c),
        };

        if consumed {
            self.frames[top].mark_consumed();
        }
        consumed
    }
}

/// 用默认的深度限制从 `input` 中提取 `rules` 指定的值
pub fn extract(input: &[u8], rules: &mut [Rule<'_>]) -> ExtractResult<()> {
    let mut extractor = Extractor::new(rules);
    extractor.feed_slice(input)?;
    extractor.finish()
}
