// ==========================================
// Starward UIGF 元数据同步 - 控制台补全向导
// ==========================================
// 输入约定（每个缺失字段一行）:
// - 物品类型: 1=武器, 2=角色（也接受 "武器"/"角色"/weapon/character）
// - 稀有度: 1~5
// - 空行: 暂缓该字段
// - b: 上一个条目  s: 跳过本条目  q: 结束补全
// - 输入流结束（EOF）视为结束补全
// 已有值的字段不再询问
// ==========================================

use crate::domain::meta::PendingEntry;
use crate::domain::types::{ItemCategory, Rarity};
use crate::engine::completion::{AnswerProvider, ResolveAction};
use crate::engine::error::{EngineError, EngineResult};
use crate::i18n::{t, t_with_args};
use std::io::{self, BufRead, Write};

/// 单个字段的输入结果
enum FieldInput<T> {
    Value(T),
    Defer,
    Command(ResolveAction),
}

pub struct ConsoleAnswerProvider<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl ConsoleAnswerProvider<io::StdinLock<'static>, io::Stdout> {
    /// 绑定标准输入/输出
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleAnswerProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 取回输出端（测试中检查提示内容）
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask<T, F>(&mut self, prompt: &str, parse: F) -> io::Result<FieldInput<T>>
    where
        F: Fn(&str) -> Option<T>,
    {
        loop {
            writeln!(self.output, "{}", prompt)?;
            write!(self.output, "{}", t("resolve.input_hint"))?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(FieldInput::Command(ResolveAction::Abandon));
            }

            let answer = line.trim();
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(FieldInput::Defer),
                "b" => return Ok(FieldInput::Command(ResolveAction::Back)),
                "s" => return Ok(FieldInput::Command(ResolveAction::Skip)),
                "q" => return Ok(FieldInput::Command(ResolveAction::Abandon)),
                _ => {}
            }

            match parse(answer) {
                Some(value) => return Ok(FieldInput::Value(value)),
                None => writeln!(self.output, "{}", t("resolve.invalid"))?,
            }
        }
    }

    fn prompt_entry(
        &mut self,
        entry: &PendingEntry,
        position: usize,
        total: usize,
    ) -> io::Result<ResolveAction> {
        let current = (position + 1).to_string();
        let total = total.to_string();
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{}",
            t_with_args(
                "resolve.progress",
                &[("current", current.as_str()), ("total", total.as_str())]
            )
        )?;
        writeln!(
            self.output,
            "{}",
            t_with_args(
                "resolve.item",
                &[("id", entry.item_id.as_str()), ("name", entry.name())]
            )
        )?;
        writeln!(self.output, "{}", t("resolve.missing_header"))?;

        let category = if entry.entry.has_item_type() {
            None
        } else {
            match self.ask(&t("resolve.choose_type"), parse_category)? {
                FieldInput::Value(category) => Some(category),
                FieldInput::Defer => None,
                FieldInput::Command(action) => return Ok(action),
            }
        };

        let rarity = if entry.entry.has_rank_type() {
            None
        } else {
            match self.ask(&t("resolve.choose_rank"), Rarity::parse)? {
                FieldInput::Value(rarity) => Some(rarity),
                FieldInput::Defer => None,
                FieldInput::Command(action) => return Ok(action),
            }
        };

        Ok(ResolveAction::Submit { category, rarity })
    }
}

fn parse_category(input: &str) -> Option<ItemCategory> {
    match input {
        "1" => Some(ItemCategory::Weapon),
        "2" => Some(ItemCategory::Character),
        other => ItemCategory::parse(other),
    }
}

impl<R: BufRead, W: Write> AnswerProvider for ConsoleAnswerProvider<R, W> {
    fn next_action(
        &mut self,
        entry: &PendingEntry,
        position: usize,
        total: usize,
    ) -> EngineResult<ResolveAction> {
        self.prompt_entry(entry, position, total)
            .map_err(|e| EngineError::AnswerProvider(format!("控制台读写失败: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meta::{MetadataEntry, MetadataStore};
    use crate::engine::completion::{find_incomplete, resolve, SessionState};
    use std::io::Cursor;

    fn store_with(entries: &[(&str, Option<&str>, Option<&str>)]) -> MetadataStore {
        let mut store = MetadataStore::new();
        for (id, item_type, rank_type) in entries {
            store.insert_if_absent(MetadataEntry {
                name: format!("Item {}", id),
                item_type: item_type.map(str::to_string),
                rank_type: rank_type.map(str::to_string),
                item_id: id.to_string(),
            });
        }
        store
    }

    fn run(store: &mut MetadataStore, input: &str) -> SessionState {
        let pending = find_incomplete(store);
        let mut console = ConsoleAnswerProvider::new(Cursor::new(input.to_string()), Vec::new());
        resolve(store, pending, &mut console).unwrap().state
    }

    #[test]
    fn test_answers_both_fields() {
        let mut store = store_with(&[("1", None, None)]);

        let state = run(&mut store, "1\n4\n");

        assert_eq!(state, SessionState::Done);
        let entry = store.get("1").unwrap();
        assert_eq!(entry.item_type.as_deref(), Some("武器"));
        assert_eq!(entry.rank_type.as_deref(), Some("4"));
    }

    #[test]
    fn test_only_missing_fields_are_prompted() {
        let mut store = store_with(&[("1", Some("角色"), None)]);

        // 只询问稀有度，一行即可
        let state = run(&mut store, "5\n");

        assert_eq!(state, SessionState::Done);
        let entry = store.get("1").unwrap();
        assert_eq!(entry.item_type.as_deref(), Some("角色"));
        assert_eq!(entry.rank_type.as_deref(), Some("5"));
    }

    #[test]
    fn test_empty_line_defers_field() {
        let mut store = store_with(&[("1", None, None)]);

        let state = run(&mut store, "\n3\n");

        assert_eq!(state, SessionState::Done);
        let entry = store.get("1").unwrap();
        assert_eq!(entry.item_type, None);
        assert_eq!(entry.rank_type.as_deref(), Some("3"));
    }

    #[test]
    fn test_invalid_input_is_asked_again() {
        let mut store = store_with(&[("1", Some("武器"), None)]);

        let pending = find_incomplete(&store);
        let mut console = ConsoleAnswerProvider::new(Cursor::new("9\nx\n4\n"), Vec::new());
        resolve(&mut store, pending, &mut console).unwrap();

        assert_eq!(store.get("1").unwrap().rank_type.as_deref(), Some("4"));
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("item_id=1"));
    }

    #[test]
    fn test_back_and_skip_commands() {
        let mut store = store_with(&[("1", None, None), ("2", None, None)]);

        // 1: 跳过；2: 返回上一个；1: 填写；2: 填写
        let state = run(&mut store, "s\nb\n2\n5\n1\n3\n");

        assert_eq!(state, SessionState::Done);
        assert_eq!(store.get("1").unwrap().item_type.as_deref(), Some("角色"));
        assert_eq!(store.get("2").unwrap().rank_type.as_deref(), Some("3"));
    }

    #[test]
    fn test_quit_and_eof_abandon() {
        let mut store = store_with(&[("1", None, None), ("2", None, None)]);
        assert_eq!(run(&mut store, "1\n4\nq\n"), SessionState::Abandoned);
        assert!(store.get("1").unwrap().is_classified());
        assert_eq!(store.get("2").unwrap().item_type, None);

        let mut store = store_with(&[("1", None, None)]);
        assert_eq!(run(&mut store, ""), SessionState::Abandoned);
    }

    #[test]
    fn test_category_input_forms() {
        assert_eq!(parse_category("1"), Some(ItemCategory::Weapon));
        assert_eq!(parse_category("角色"), Some(ItemCategory::Character));
        assert_eq!(parse_category("weapon"), Some(ItemCategory::Weapon));
        assert_eq!(parse_category("3"), None);
    }
}
