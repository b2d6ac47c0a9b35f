//! フラグメントの所有者（メッセージ）側のインターフェース
//!
//! エディタはフラグメント列を直接書き換えず、`FragmentStore` を通じて置換・削除を依頼する。
//! 編集途中のテキストは `EditScratch` がフラグメントIDごとに保持する。

use crate::error::StoreError;
use crate::fragments::{duplicate_fragments, AttachmentFragment, Fragment, FragmentId};
use std::collections::HashMap;

/// フラグメント列への置換・削除
pub trait FragmentStore {
    /// `fragment_id` のフラグメントを `new_fragment` と入れ替える
    fn replace(&mut self, fragment_id: &FragmentId, new_fragment: Fragment) -> Result<(), StoreError>;

    /// `fragment_id` のフラグメントを取り除く
    fn remove(&mut self, fragment_id: &FragmentId) -> Result<(), StoreError>;
}

/// 編集中テキストの一時バッファ
pub trait EditScratch {
    fn set_edited_text(&mut self, fragment_id: &FragmentId, value: String);

    fn edited_text(&self, fragment_id: &FragmentId) -> Option<&str>;

    fn clear_edited_text(&mut self, fragment_id: &FragmentId);
}

/// エディタが必要とするホスト機能一式
pub trait FragmentHost: FragmentStore + EditScratch {}

impl<T: FragmentStore + EditScratch + ?Sized> FragmentHost for T {}

/// 1メッセージ分のフラグメント列（メモリ内実装）
#[derive(Debug, Clone, Default)]
pub struct MessageFragments {
    fragments: Vec<Fragment>,
    edited: HashMap<FragmentId, String>,
}

impl MessageFragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存のフラグメント列から作成（識別子の重複は拒否）
    pub fn from_fragments(fragments: Vec<Fragment>) -> Result<Self, StoreError> {
        let mut message = Self::new();
        for fragment in fragments {
            message.push(fragment)?;
        }
        Ok(message)
    }

    /// 末尾に追加
    pub fn push(&mut self, fragment: impl Into<Fragment>) -> Result<(), StoreError> {
        let fragment = fragment.into();
        if self.position(fragment.id()).is_some() {
            return Err(StoreError::DuplicateId {
                id: fragment.id().clone(),
            });
        }
        self.fragments.push(fragment);
        Ok(())
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn get(&self, fragment_id: &FragmentId) -> Option<&Fragment> {
        self.fragments.iter().find(|fragment| fragment.id() == fragment_id)
    }

    pub fn position(&self, fragment_id: &FragmentId) -> Option<usize> {
        self.fragments
            .iter()
            .position(|fragment| fragment.id() == fragment_id)
    }

    pub fn attachments(&self) -> impl Iterator<Item = &AttachmentFragment> {
        self.fragments.iter().filter_map(Fragment::as_attachment)
    }

    /// 全フラグメントを新しい識別子で複製したメッセージ（編集バッファは引き継がない）
    pub fn duplicate(&self) -> Self {
        Self {
            fragments: duplicate_fragments(&self.fragments),
            edited: HashMap::new(),
        }
    }
}

impl FragmentStore for MessageFragments {
    fn replace(&mut self, fragment_id: &FragmentId, new_fragment: Fragment) -> Result<(), StoreError> {
        let index = self.position(fragment_id).ok_or_else(|| StoreError::NotFound {
            id: fragment_id.clone(),
        })?;

        let clashes = self
            .fragments
            .iter()
            .enumerate()
            .any(|(i, fragment)| i != index && fragment.id() == new_fragment.id());
        if clashes {
            return Err(StoreError::DuplicateId {
                id: new_fragment.id().clone(),
            });
        }

        log::debug!("replace fragment {} with {}", fragment_id, new_fragment.id());
        self.fragments[index] = new_fragment;
        self.edited.remove(fragment_id);
        Ok(())
    }

    fn remove(&mut self, fragment_id: &FragmentId) -> Result<(), StoreError> {
        let index = self.position(fragment_id).ok_or_else(|| StoreError::NotFound {
            id: fragment_id.clone(),
        })?;

        log::debug!("remove fragment {}", fragment_id);
        self.fragments.remove(index);
        self.edited.remove(fragment_id);
        Ok(())
    }
}

impl EditScratch for MessageFragments {
    fn set_edited_text(&mut self, fragment_id: &FragmentId, value: String) {
        self.edited.insert(fragment_id.clone(), value);
    }

    fn edited_text(&self, fragment_id: &FragmentId) -> Option<&str> {
        self.edited.get(fragment_id).map(String::as_str)
    }

    fn clear_edited_text(&mut self, fragment_id: &FragmentId) {
        self.edited.remove(fragment_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragments::{ContentFragment, EmbedMimeType, InlineData};

    fn note(text: &str) -> AttachmentFragment {
        AttachmentFragment::embed("note", "", InlineData::text(text, None), EmbedMimeType::TextPlain, None)
    }

    #[test]
    fn replace_keeps_position_and_clears_scratch() {
        let first = ContentFragment::text("body");
        let attachment = note("old");
        let id = attachment.f_id.clone();
        let mut message = MessageFragments::from_fragments(vec![first.into(), attachment.clone().into()]).unwrap();
        message.set_edited_text(&id, "new".to_string());

        let replacement = attachment.shallow_replace_embed(InlineData::text("new", None));
        let new_id = replacement.f_id.clone();
        message.replace(&id, replacement.into()).unwrap();

        assert_eq!(message.position(&new_id), Some(1));
        assert!(message.get(&id).is_none());
        assert_eq!(message.edited_text(&id), None);
    }

    #[test]
    fn remove_unknown_fragment_fails() {
        let mut message = MessageFragments::new();
        let missing = FragmentId::from("missing0");

        assert_eq!(
            message.remove(&missing),
            Err(StoreError::NotFound { id: missing.clone() })
        );
    }

    #[test]
    fn push_rejects_duplicate_ids() {
        let fragment = ContentFragment::text("x");
        let mut message = MessageFragments::new();
        message.push(fragment.clone()).unwrap();

        assert!(matches!(message.push(fragment), Err(StoreError::DuplicateId { .. })));
    }

    #[test]
    fn replace_rejects_id_of_another_fragment() {
        let a = note("a");
        let b = note("b");
        let mut message = MessageFragments::from_fragments(vec![a.clone().into(), b.clone().into()]).unwrap();

        let result = message.replace(&a.f_id, Fragment::from(b.clone()));
        assert_eq!(result, Err(StoreError::DuplicateId { id: b.f_id.clone() }));
        assert_eq!(message.len(), 2);
    }

    #[test]
    fn duplicated_message_has_new_ids() {
        let message = MessageFragments::from_fragments(vec![note("a").into()]).unwrap();
        let copy = message.duplicate();

        assert_eq!(copy.len(), 1);
        assert_ne!(copy.fragments()[0].id(), message.fragments()[0].id());
        assert_eq!(copy.attachments().count(), 1);
    }
}
