//! フラグメントIDをキーにしたエディタの集合
//!
//! メッセージ側のフラグメント列に合わせてエディタを作成・破棄する。
//! 置換で識別子が変わったフラグメントのエディタは破棄され、新しいものが表示状態で作られる。

use super::DocumentFragmentEditor;
use crate::config::EditorConfig;
use crate::fragments::{Fragment, FragmentId};

#[derive(Debug, Clone, Default)]
pub struct EditorSet {
    editors: Vec<DocumentFragmentEditor>,
    config: EditorConfig,
}

impl EditorSet {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            editors: Vec::new(),
            config,
        }
    }

    /// フラグメント列と同期する。破棄したエディタの数を返す。
    ///
    /// 埋め込みアタッチメントだけが対象で、既存のエディタは状態を保ったまま残る。
    /// 同じ識別子で中身が変わったフラグメントは取り込み直し、埋め込みでなくなっていれば破棄する。
    pub fn sync(&mut self, fragments: &[Fragment]) -> usize {
        let mut previous = std::mem::take(&mut self.editors);
        let mut rejected = 0;

        for attachment in fragments.iter().filter_map(Fragment::as_attachment) {
            if let Some(index) = previous
                .iter()
                .position(|editor| editor.fragment_id() == &attachment.f_id)
            {
                let mut editor = previous.swap_remove(index);
                if editor.fragment() != attachment {
                    if let Err(err) = editor.refresh(attachment) {
                        log::debug!("dropped editor for {}: {}", attachment.f_id, err);
                        rejected += 1;
                        continue;
                    }
                }
                self.editors.push(editor);
                continue;
            }

            match DocumentFragmentEditor::new(attachment, self.config.clone()) {
                Ok(editor) => self.editors.push(editor),
                Err(err) => log::debug!("no editor for {}: {}", attachment.f_id, err),
            }
        }

        if !previous.is_empty() {
            log::debug!("dropped {} stale fragment editors", previous.len());
        }
        previous.len() + rejected
    }

    pub fn get(&self, fragment_id: &FragmentId) -> Option<&DocumentFragmentEditor> {
        self.editors
            .iter()
            .find(|editor| editor.fragment_id() == fragment_id)
    }

    pub fn get_mut(&mut self, fragment_id: &FragmentId) -> Option<&mut DocumentFragmentEditor> {
        self.editors
            .iter_mut()
            .find(|editor| editor.fragment_id() == fragment_id)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut DocumentFragmentEditor> {
        self.editors.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentFragmentEditor> {
        self.editors.iter()
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorMode;
    use crate::message::{FragmentStore, MessageFragments};
    use crate::fragments::{AttachmentFragment, ContentFragment, DataRef, EmbedMimeType, InlineData};

    fn note(text: &str) -> Fragment {
        AttachmentFragment::embed("n", "", InlineData::text(text, None), EmbedMimeType::TextPlain, None).into()
    }

    #[test]
    fn only_embed_attachments_get_editors() {
        let fragments = vec![
            ContentFragment::text("body").into(),
            note("a"),
            AttachmentFragment::image("img", "", DataRef::url("https://x/i.png"), None, None, None).into(),
        ];
        let mut set = EditorSet::new(EditorConfig::default());

        assert_eq!(set.sync(&fragments), 0);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn sync_keeps_state_of_surviving_editors() {
        let first = note("a");
        let second = note("b");
        let mut set = EditorSet::new(EditorConfig::default());
        set.sync(&[first.clone(), second.clone()]);

        set.get_mut(first.id()).unwrap().toggle_delete_armed();
        let dropped = set.sync(&[first.clone()]);

        assert_eq!(dropped, 1);
        assert_eq!(set.get(first.id()).unwrap().mode(), EditorMode::DeleteArmed);
        assert!(set.get(second.id()).is_none());
    }

    #[test]
    fn same_id_replacement_refreshes_editor() {
        let original = note("old");
        let id = original.id().clone();
        let mut message = MessageFragments::from_fragments(vec![original]).unwrap();
        let mut set = EditorSet::new(EditorConfig::default());
        set.sync(message.fragments());
        set.get_mut(&id).unwrap().toggle_delete_armed();

        let mut updated = AttachmentFragment::embed("n", "", InlineData::text("new", None), EmbedMimeType::TextPlain, None);
        updated.f_id = id.clone();
        message.replace(&id, updated.into()).unwrap();

        assert_eq!(set.sync(message.fragments()), 0);
        let editor = set.get(&id).unwrap();
        assert_eq!(editor.original_text(), "new");
        assert_eq!(editor.mode(), EditorMode::DeleteArmed);
    }

    #[test]
    fn same_id_replacement_with_image_drops_editor() {
        let original = note("old");
        let id = original.id().clone();
        let mut message = MessageFragments::from_fragments(vec![original]).unwrap();
        let mut set = EditorSet::new(EditorConfig::default());
        set.sync(message.fragments());

        let mut image = AttachmentFragment::image("n", "", DataRef::url("https://x/i.png"), None, None, None);
        image.f_id = id.clone();
        message.replace(&id, image.into()).unwrap();

        assert_eq!(set.sync(message.fragments()), 1);
        assert!(set.get(&id).is_none());
        assert!(set.is_empty());
    }
}
