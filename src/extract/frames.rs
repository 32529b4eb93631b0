use tracing::trace;

use crate::{ExtractError, InternalError};

use super::stack_frame::{Frame, FrameStatus, Partial, ValueKind};
use super::step::Step;
use super::Extractor;

/// collect 子 frame 的结果
#[derive(Debug)]
pub(crate) enum Reaped {
    /// 子 frame close 了，带回它的值
    Closed(ValueKind, Partial),
    /// 子 frame 没吃掉任何字符就 fail 了，父 frame 可以拿同一个字符去试下一个候选
    Mismatched,
    /// 子 frame 吃掉过字符之后 fail 了
    Failed,
    /// frame 栈的簿记出错，错误已经记在 Extractor 上
    Invalid,
}

/// frame 栈的原语: push / replace / complete / collect
///
/// 这些原语从不 panic，簿记出错时记下一个粘滞的错误，之后所有原语都变成空操作。
impl<'r, 'a, const DEPTH: usize> Extractor<'r, 'a, DEPTH> {
    pub(super) fn top_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.frames_len - 1]
    }

    /// 记下第一个错误，不覆盖已有的错误
    pub(super) fn abort(&mut self, err: ExtractError) {
        if self.error.is_none() {
            trace!(%err, position = self.position, "abort");
            self.error = Some(err);
        }
    }

    pub(super) fn raise(&mut self, err: InternalError) {
        self.abort(err.into());
    }

    pub(super) fn payload_mismatch(&mut self) -> bool {
        self.raise(InternalError::PayloadMismatch);
        false
    }

    /// 递归进入一个子结构
    pub(super) fn push(&mut self, step: Step) {
        if self.error.is_some() {
            return;
        }

        if self.frames_len == DEPTH {
            self.abort(ExtractError::DepthExceeded(DEPTH));
            return;
        }

        let frame = &mut self.frames[self.frames_len];
        if frame.status() != FrameStatus::Free {
            self.raise(InternalError::FrameNotFree);
            return;
        }

        frame.claim(step);
        self.frames_len += 1;
        trace!(depth = self.frames_len, ?step, "push");
    }

    /// 同一个结构切换到下一个状态，栈不增长
    pub(super) fn replace(&mut self, step: Step) {
        if self.error.is_some() {
            return;
        }

        if self.frames_len == 0 {
            self.raise(InternalError::StackEmpty);
            return;
        }

        self.top_mut().step = step;
        trace!(depth = self.frames_len, ?step, "replace");
    }

    fn complete(&mut self, success: bool) {
        if self.error.is_some() {
            return;
        }

        if self.frames_len == 0 {
            self.raise(InternalError::StackEmpty);
            return;
        }

        let frame = self.top_mut();
        if frame.status() != FrameStatus::InUse {
            self.raise(InternalError::FrameNotInUse);
            return;
        }

        frame.retire(success);
        self.frames_len -= 1;
        trace!(depth = self.frames_len, success, "complete");
    }

    pub(super) fn close(&mut self) {
        self.complete(true);
    }

    pub(super) fn fail(&mut self) {
        self.complete(false);
    }

    /// 取回刚结束的子 frame (就在当前栈顶之上) 的结果，并把它还给 frame 池。
    pub(super) fn collect(&mut self) -> Reaped {
        if self.error.is_some() {
            return Reaped::Invalid;
        }

        if self.frames_len == DEPTH {
            self.raise(InternalError::PoolExhausted);
            return Reaped::Invalid;
        }

        let frame = &mut self.frames[self.frames_len];
        if frame.status() != FrameStatus::Zombie {
            self.raise(InternalError::FrameNotZombie);
            return Reaped::Invalid;
        }

        let complete = frame.is_complete();
        let consumed = frame.consumed();
        let (kind, value) = frame.release();
        trace!(depth = self.frames_len, complete, consumed, ?kind, "collect");

        match (complete, consumed) {
            (true, _) => Reaped::Closed(kind, value),
            (false, false) => Reaped::Mismatched,
            (false, true) => Reaped::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor<'a, const DEPTH: usize>(rules: &'a mut [crate::Rule<'static>]) -> Extractor<'a, 'static, DEPTH> {
        Extractor::with_depth(rules)
    }

    #[test]
    fn test_push_and_collect() {
        let mut rules = [];
        let mut ex = extractor::<4>(&mut rules);
        assert_eq!(1, ex.frames_len);

        ex.push(Step::Str);
        assert_eq!(2, ex.frames_len);
        ex.top_mut().set_kind(ValueKind::Str);
        ex.close();
        assert_eq!(1, ex.frames_len);

        let Reaped::Closed(kind, _) = ex.collect() else {
            panic!("child should be closed");
        };
        assert_eq!(ValueKind::Str, kind);
        assert_eq!(FrameStatus::Free, ex.frames[1].status());
        assert!(ex.error.is_none());
    }

    #[test]
    fn test_mismatched_and_failed() {
        let mut rules = [];
        let mut ex = extractor::<4>(&mut rules);

        ex.push(Step::Number);
        ex.fail();
        assert!(matches!(ex.collect(), Reaped::Mismatched));

        ex.push(Step::Number);
        ex.top_mut().mark_consumed();
        ex.fail();
        assert!(matches!(ex.collect(), Reaped::Failed));
    }

    #[test]
    fn test_depth_exceeded() {
        let mut rules = [];
        let mut ex = extractor::<2>(&mut rules);
        ex.push(Step::Value);
        assert_eq!(2, ex.frames_len);

        ex.push(Step::Value);
        assert_eq!(Some(ExtractError::DepthExceeded(2)), ex.error);
        assert_eq!(2, ex.frames_len);

        // 出错之后所有原语都是空操作
        ex.fail();
        assert_eq!(2, ex.frames_len);
    }

    #[test]
    fn test_collect_requires_zombie() {
        let mut rules = [];
        let mut ex = extractor::<4>(&mut rules);
        assert!(matches!(ex.collect(), Reaped::Invalid));
        assert_eq!(Some(ExtractError::Internal(InternalError::FrameNotZombie)), ex.error);
    }

    #[test]
    fn test_collect_pool_exhausted() {
        let mut rules = [];
        let mut ex = extractor::<2>(&mut rules);
        ex.push(Step::Value);
        assert!(matches!(ex.collect(), Reaped::Invalid));
        assert_eq!(Some(ExtractError::Internal(InternalError::PoolExhausted)), ex.error);
    }

    #[test]
    fn test_complete_on_empty_stack() {
        let mut rules = [];
        let mut ex = extractor::<2>(&mut rules);
        ex.close();
        assert_eq!(0, ex.frames_len);

        ex.close();
        assert_eq!(Some(ExtractError::Internal(InternalError::StackEmpty)), ex.error);
    }
}
