//! 埋め込みアタッチメントのエディタ本体

use super::commands::{CommandBar, EditorCommand};
use super::view::{BlocksRequest, EditorBody, EditorView, TextEditRequest};
use super::{EditOutcome, EditorMode, EditorSignal};
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::fragments::{AttachmentFragment, EmbedPart, Fragment, FragmentId, InlineData};
use crate::message::{EditScratch, FragmentHost, FragmentStore};
use crate::text::{wrap_text, WrapStyle};

/// ドキュメントフラグメントエディタ
///
/// 1つの埋め込みアタッチメントに対応する。置換後は新しい識別子のフラグメントが
/// できるため、このエディタは古いフラグメントと一緒に破棄される想定
/// （[`super::EditorSet::sync`] を参照）。
#[derive(Debug, Clone)]
pub struct DocumentFragmentEditor {
    fragment: AttachmentFragment,
    embed: EmbedPart,
    mode: EditorMode,
    config: EditorConfig,
}

impl DocumentFragmentEditor {
    /// 埋め込み以外のパートを持つフラグメントは即座に拒否する
    pub fn new(fragment: &AttachmentFragment, config: EditorConfig) -> Result<Self, EditorError> {
        Ok(Self {
            fragment: fragment.clone(),
            embed: embed_of(fragment)?,
            mode: EditorMode::Viewing,
            config,
        })
    }

    /// 任意のフラグメントから作成（コンテンツフラグメントは拒否）
    pub fn for_fragment(fragment: &Fragment, config: EditorConfig) -> Result<Self, EditorError> {
        match fragment {
            Fragment::Attachment(attachment) => Self::new(attachment, config),
            Fragment::Content(content) => Err(EditorError::UnexpectedPart {
                kind: content.part.kind(),
            }),
        }
    }

    /// 同じ識別子のまま差し替わったフラグメントを取り込む（状態は保持）
    ///
    /// 埋め込み以外のパートになっていたらエラーを返し、エディタは変更しない。
    pub fn refresh(&mut self, fragment: &AttachmentFragment) -> Result<(), EditorError> {
        self.embed = embed_of(fragment)?;
        self.fragment = fragment.clone();
        Ok(())
    }

    pub fn fragment_id(&self) -> &FragmentId {
        &self.fragment.f_id
    }

    pub fn fragment(&self) -> &AttachmentFragment {
        &self.fragment
    }

    /// 編集前の本文
    pub fn original_text(&self) -> &str {
        self.embed.text()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditorMode::Editing
    }

    pub fn is_delete_armed(&self) -> bool {
        self.mode == EditorMode::DeleteArmed
    }

    /// 表示 ⇄ 削除確認（編集中なら編集を解除して削除確認へ）
    pub fn toggle_delete_armed(&mut self) -> EditOutcome {
        self.mode = match self.mode {
            EditorMode::DeleteArmed => EditorMode::Viewing,
            EditorMode::Viewing | EditorMode::Editing => EditorMode::DeleteArmed,
        };
        log::debug!("fragment {}: {}", self.fragment.f_id, self.mode);
        EditOutcome::ModeChanged(self.mode)
    }

    /// 表示 ⇄ 編集（削除確認中なら解除して編集へ）
    pub fn toggle_edit(&mut self) -> EditOutcome {
        self.mode = match self.mode {
            EditorMode::Editing => EditorMode::Viewing,
            EditorMode::Viewing | EditorMode::DeleteArmed => EditorMode::Editing,
        };
        log::debug!("fragment {}: {}", self.fragment.f_id, self.mode);
        EditOutcome::ModeChanged(self.mode)
    }

    /// 削除を確定する（削除確認中のみ）
    pub fn confirm_delete<S: FragmentStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<EditOutcome, EditorError> {
        self.require_mode(EditorMode::DeleteArmed, "confirm delete")?;
        self.delete_fragment(store)
    }

    /// 編集を確定する（編集中のみ）
    ///
    /// 空のテキストは保存せず削除として扱う。ホストに編集中テキストがなければ何もしない。
    pub fn confirm_edit<H: FragmentHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<EditOutcome, EditorError> {
        self.require_mode(EditorMode::Editing, "confirm edit")?;

        let edited = match host.edited_text(&self.fragment.f_id) {
            Some(text) => text.to_string(),
            None => return Ok(EditOutcome::Unchanged),
        };

        if edited.is_empty() {
            return self.delete_fragment(host);
        }

        let replacement = self
            .fragment
            .shallow_replace_embed(InlineData::text(edited, None));
        let new_fragment_id = replacement.f_id.clone();
        host.replace(&self.fragment.f_id, Fragment::Attachment(replacement))?;

        log::info!("fragment {} replaced by {}", self.fragment.f_id, new_fragment_id);
        self.mode = EditorMode::Viewing;
        Ok(EditOutcome::Replaced {
            fragment_id: self.fragment.f_id.clone(),
            new_fragment_id,
        })
    }

    /// テキスト編集部品からの合図を処理
    pub fn handle_signal<H: FragmentHost + ?Sized>(
        &mut self,
        signal: EditorSignal,
        host: &mut H,
    ) -> Result<EditOutcome, EditorError> {
        match (self.mode, signal) {
            (EditorMode::Editing, EditorSignal::Enter) => self.confirm_edit(host),
            (EditorMode::Editing, EditorSignal::Escape) => Ok(self.toggle_edit()),
            (mode, signal) => {
                log::warn!("ignored {:?} signal while {}", signal, mode);
                Ok(EditOutcome::Ignored)
            }
        }
    }

    /// コマンドバーからのコマンドを実行
    pub fn dispatch<H: FragmentHost + ?Sized>(
        &mut self,
        command: EditorCommand,
        host: &mut H,
    ) -> Result<EditOutcome, EditorError> {
        match command {
            EditorCommand::ToggleDeleteArmed => Ok(self.toggle_delete_armed()),
            EditorCommand::ConfirmDelete => self.confirm_delete(host),
            EditorCommand::ToggleEdit => Ok(self.toggle_edit()),
            EditorCommand::ConfirmEdit => self.confirm_edit(host),
        }
    }

    /// 編集中テキストをホストに渡す
    pub fn set_edited_text<S: EditScratch + ?Sized>(&self, scratch: &mut S, value: impl Into<String>) {
        scratch.set_edited_text(&self.fragment.f_id, value.into());
    }

    pub fn commands(&self) -> CommandBar {
        CommandBar::for_mode(self.mode)
    }

    /// 現在の状態で描画部品に渡す内容
    pub fn view<S: EditScratch + ?Sized>(&self, scratch: &S) -> EditorView {
        let body = if self.is_editing() {
            EditorBody::TextEditor(TextEditRequest {
                fragment_id: self.fragment.f_id.clone(),
                initial_text: self.embed.text().to_string(),
                edited_text: scratch
                    .edited_text(&self.fragment.f_id)
                    .map(str::to_string),
                content_scaling: self.config.content_scaling,
            })
        } else {
            EditorBody::Blocks(BlocksRequest {
                text: wrap_text(
                    self.embed.text(),
                    self.embed.named_ref().unwrap_or(""),
                    WrapStyle::MarkdownCode,
                ),
                from_role: self.config.message_role,
                content_scaling: self.config.content_scaling,
                fit_screen: self.config.is_mobile,
                special_code_plain: true,
                render_text_as_markdown: self.config.render_text_as_markdown,
            })
        };

        EditorView {
            fragment_id: self.fragment.f_id.clone(),
            title: self.fragment.title.clone(),
            caption: self.fragment.caption.clone(),
            mode: self.mode,
            body,
            commands: self.commands(),
        }
    }

    fn require_mode(&self, expected: EditorMode, action: &'static str) -> Result<(), EditorError> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(EditorError::InvalidTransition {
                action,
                mode: self.mode,
            })
        }
    }

    fn delete_fragment<S: FragmentStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<EditOutcome, EditorError> {
        store.remove(&self.fragment.f_id)?;
        log::info!("fragment {} deleted", self.fragment.f_id);
        Ok(EditOutcome::Deleted {
            fragment_id: self.fragment.f_id.clone(),
        })
    }
}

fn embed_of(fragment: &AttachmentFragment) -> Result<EmbedPart, EditorError> {
    fragment
        .embed_part()
        .cloned()
        .ok_or(EditorError::UnexpectedPart {
            kind: fragment.part.kind(),
        })
}
