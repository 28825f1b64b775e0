// ==========================================
// Starward UIGF 元数据同步 - 元数据补全
// ==========================================
// 职责:
// 1. 找出有 name 但缺少 item_type 或 rank_type 的条目
// 2. 以显式状态机驱动人工补全（与具体界面解耦）
// 状态: AwaitingAnswer(i) / Done / Abandoned
// 动作: Submit → i+1 或 Done；Skip → i+1 或 Done；Back → i-1；Abandon → Abandoned
// 红线: 只写入提交时刻库中仍为空的字段；放弃时已确认的答案保留
// ==========================================

use crate::domain::meta::{MetadataStore, PendingEntry};
use crate::domain::types::{ItemCategory, Rarity};
use crate::engine::error::{EngineError, EngineResult};
use crate::importer::answer_sheet::SheetAnswer;
use std::cmp::Ordering;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use tracing::{debug, info};

// ==========================================
// 待补全条目收集
// ==========================================

/// 排序键: 纯数字 id 按数值升序，其余 id 按字典序排在数字之后
fn compare_item_ids(a: &str, b: &str) -> Ordering {
    fn numeric(id: &str) -> Option<u128> {
        if !id.is_empty() && id.bytes().all(|c| c.is_ascii_digit()) {
            id.parse::<u128>().ok()
        } else {
            None
        }
    }

    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// 找出待补全条目
///
/// # 条件
/// - item_id 与 name 均非空（缺 name 的条目无法在此补全，跳过）
/// - 缺少 item_type 或 rank_type
pub fn find_incomplete(store: &MetadataStore) -> Vec<PendingEntry> {
    let mut pending: Vec<PendingEntry> = store
        .iter()
        .filter(|(key, entry)| {
            !key.is_empty()
                && !entry.item_id.is_empty()
                && entry.has_name()
                && !entry.is_classified()
        })
        .map(|(key, entry)| PendingEntry {
            item_id: key.clone(),
            entry: entry.clone(),
        })
        .collect();

    pending.sort_by(|a, b| compare_item_ids(&a.item_id, &b.item_id));
    pending
}

// ==========================================
// 状态机
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingAnswer(usize),
    Done,
    Abandoned,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::AwaitingAnswer(i) => write!(f, "AWAITING_ANSWER({})", i),
            SessionState::Done => write!(f, "DONE"),
            SessionState::Abandoned => write!(f, "ABANDONED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAction {
    /// 提交答案；None 表示暂缓该字段
    Submit {
        category: Option<ItemCategory>,
        rarity: Option<Rarity>,
    },
    Skip,
    Back,
    Abandon,
}

impl fmt::Display for ResolveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveAction::Submit { .. } => write!(f, "SUBMIT"),
            ResolveAction::Skip => write!(f, "SKIP"),
            ResolveAction::Back => write!(f, "BACK"),
            ResolveAction::Abandon => write!(f, "ABANDON"),
        }
    }
}

/// 补全结果汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionSummary {
    pub state: SessionState,
    pub submitted: usize,      // Submit 次数
    pub fields_written: usize, // 实际写入库的字段数
}

pub struct ResolveSession<'a> {
    store: &'a mut MetadataStore,
    pending: Vec<PendingEntry>,
    state: SessionState,
    submitted: usize,
    fields_written: usize,
}

impl<'a> ResolveSession<'a> {
    /// 创建会话；待补全列表为空时直接处于 Done
    pub fn new(store: &'a mut MetadataStore, pending: Vec<PendingEntry>) -> Self {
        let state = if pending.is_empty() {
            SessionState::Done
        } else {
            SessionState::AwaitingAnswer(0)
        };
        Self {
            store,
            pending,
            state,
            submitted: 0,
            fields_written: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 当前序号（会话结束后为 None）
    pub fn position(&self) -> Option<usize> {
        match self.state {
            SessionState::AwaitingAnswer(i) => Some(i),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// 当前待回答条目（库中最新值）
    pub fn current(&self) -> Option<PendingEntry> {
        match self.state {
            SessionState::AwaitingAnswer(i) => {
                let item_id = &self.pending[i].item_id;
                let entry = self
                    .store
                    .get(item_id)
                    .cloned()
                    .unwrap_or_else(|| self.pending[i].entry.clone());
                Some(PendingEntry {
                    item_id: item_id.clone(),
                    entry,
                })
            }
            _ => None,
        }
    }

    /// 执行一次动作
    ///
    /// # 返回
    /// - Ok(SessionState): 动作后的新状态
    /// - Err(InvalidStateTransition): 会话已结束
    pub fn apply(&mut self, action: ResolveAction) -> EngineResult<SessionState> {
        let index = match self.state {
            SessionState::AwaitingAnswer(i) => i,
            closed => {
                return Err(EngineError::InvalidStateTransition {
                    from: closed.to_string(),
                    action: action.to_string(),
                })
            }
        };

        self.state = match action {
            ResolveAction::Submit { category, rarity } => {
                self.write_answer(index, category, rarity);
                self.submitted += 1;
                self.advance(index)
            }
            ResolveAction::Skip => self.advance(index),
            ResolveAction::Back => SessionState::AwaitingAnswer(index.saturating_sub(1)),
            ResolveAction::Abandon => SessionState::Abandoned,
        };
        Ok(self.state)
    }

    pub fn summary(&self) -> ResolutionSummary {
        ResolutionSummary {
            state: self.state,
            submitted: self.submitted,
            fields_written: self.fields_written,
        }
    }

    fn advance(&self, index: usize) -> SessionState {
        if index + 1 < self.pending.len() {
            SessionState::AwaitingAnswer(index + 1)
        } else {
            SessionState::Done
        }
    }

    // 仅写入此刻库中仍为空的字段
    fn write_answer(&mut self, index: usize, category: Option<ItemCategory>, rarity: Option<Rarity>) {
        let item_id = &self.pending[index].item_id;
        let Some(entry) = self.store.get_mut(item_id) else {
            debug!(item_id = %item_id, "条目已不在元数据库中，忽略答案");
            return;
        };

        let category_label = category.map(|c| c.label());
        let rarity_text = rarity.map(|r| r.to_string());
        let written = entry.fill_missing(None, category_label, rarity_text.as_deref());
        if written > 0 {
            debug!(item_id = %item_id, written, "补全答案已写入");
        }
        self.fields_written += written;
    }
}

// ==========================================
// AnswerProvider - 答案来源（界面层协作者）
// ==========================================
// 实现者: 控制台向导、CSV 答题表、脚本化测试
pub trait AnswerProvider {
    /// 为当前条目给出动作
    ///
    /// # 参数
    /// - entry: 当前条目（库中最新值）
    /// - position: 从 0 开始的序号
    /// - total: 待补全总数
    fn next_action(
        &mut self,
        entry: &PendingEntry,
        position: usize,
        total: usize,
    ) -> EngineResult<ResolveAction>;
}

/// 用答案来源驱动整个补全会话
pub fn resolve(
    store: &mut MetadataStore,
    pending: Vec<PendingEntry>,
    provider: &mut dyn AnswerProvider,
) -> EngineResult<ResolutionSummary> {
    let mut session = ResolveSession::new(store, pending);
    let total = session.len();

    while let SessionState::AwaitingAnswer(position) = session.state() {
        let Some(current) = session.current() else {
            break;
        };
        let action = provider.next_action(&current, position, total)?;
        session.apply(action)?;
    }

    let summary = session.summary();
    info!(
        state = %summary.state,
        total,
        submitted = summary.submitted,
        fields_written = summary.fields_written,
        "元数据补全结束"
    );
    Ok(summary)
}

// ==========================================
// ScriptedAnswers - 预置动作序列
// ==========================================
// 动作耗尽后视为放弃
#[derive(Debug, Default)]
pub struct ScriptedAnswers {
    actions: VecDeque<ResolveAction>,
}

impl ScriptedAnswers {
    pub fn new(actions: impl IntoIterator<Item = ResolveAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }
}

impl AnswerProvider for ScriptedAnswers {
    fn next_action(
        &mut self,
        _entry: &PendingEntry,
        _position: usize,
        _total: usize,
    ) -> EngineResult<ResolveAction> {
        Ok(self.actions.pop_front().unwrap_or(ResolveAction::Abandon))
    }
}

// ==========================================
// SheetAnswers - CSV 答题表答案
// ==========================================
// 表中没有的条目跳过
#[derive(Debug, Default)]
pub struct SheetAnswers {
    answers: BTreeMap<String, SheetAnswer>,
}

impl SheetAnswers {
    pub fn new(answers: BTreeMap<String, SheetAnswer>) -> Self {
        Self { answers }
    }
}

impl AnswerProvider for SheetAnswers {
    fn next_action(
        &mut self,
        entry: &PendingEntry,
        _position: usize,
        _total: usize,
    ) -> EngineResult<ResolveAction> {
        Ok(match self.answers.get(&entry.item_id) {
            Some(answer) => ResolveAction::Submit {
                category: answer.category,
                rarity: answer.rarity,
            },
            None => ResolveAction::Skip,
        })
    }
}
