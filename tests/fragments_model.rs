//! フラグメントモデルの公開APIテスト
//!
//! 変換・差し替え・複製とシリアライズ形式の検証

use fragdoc::fragments::{
    duplicate_fragments, AttachmentFragment, AttachmentPart, BlobAssetId, ContentFragment,
    ContentPart, DataRef, EmbedMeta, EmbedMimeType, Fragment, ImageRefPart, InlineData,
};
use serde_json::{json, Map};

fn unsupported_parts() -> Vec<ContentPart> {
    let mut args = Map::new();
    args.insert("city".to_string(), json!("Kyoto"));
    vec![
        ContentPart::Error {
            error: "rate limited".to_string(),
        },
        ContentPart::Placeholder {
            p_text: "...".to_string(),
        },
        ContentFragment::tool_call("weather", args.clone()).part,
        ContentFragment::tool_response("weather", args).part,
    ]
}

#[test]
fn unsupported_parts_become_error_embeds() {
    for part in unsupported_parts() {
        let attachment = AttachmentFragment::from_content_part("title", "caption", &part, None);
        let embed = attachment
            .embed_part()
            .unwrap_or_else(|| panic!("expected embed for {}", part.kind()));

        assert!(
            embed.text().contains("is not supported yet."),
            "unexpected text for {}: {}",
            part.kind(),
            embed.text()
        );
        assert!(embed.text().contains(part.kind().as_str()));
        assert_eq!(attachment.title, "Error");
    }
}

#[test]
fn image_part_converts_to_image_attachment() {
    let image = ImageRefPart::new(
        DataRef::dblob(BlobAssetId::new("asset-7"), "image/webp", 1024),
        Some("cat".to_string()),
        Some(64),
        Some(48),
    );
    let attachment = AttachmentFragment::from_content_part(
        "cat.webp",
        "",
        &ContentPart::ImageRef(image.clone()),
        None,
    );

    assert_eq!(attachment.part, AttachmentPart::ImageRef(image));
    assert_eq!(attachment.title, "cat.webp");
}

#[test]
fn shallow_replace_embed_keeps_labels() {
    let original = AttachmentFragment::embed(
        "report.md",
        "from upload",
        InlineData::text("draft", Some("text/markdown".to_string())),
        EmbedMimeType::TextMarkdown,
        Some(EmbedMeta::named("report.md")),
    );

    let replaced = original.shallow_replace_embed(InlineData::text("final", None));

    assert_ne!(replaced.f_id, original.f_id);
    assert_eq!(replaced.title, "report.md");
    assert_eq!(replaced.caption, "from upload");
    assert!(replaced.created >= original.created);

    let embed = replaced.embed_part().unwrap();
    assert_eq!(embed.data, InlineData::text("final", None));
    assert_eq!(embed.emime, EmbedMimeType::TextMarkdown);
    assert_eq!(embed.named_ref(), Some("report.md"));
}

#[test]
fn shallow_replace_text_gets_new_identity() {
    let original = ContentFragment::text("v1");
    let replaced = original.shallow_replace_text("v2");

    assert_ne!(replaced.f_id, original.f_id);
    assert_eq!(replaced.part, ContentPart::Text { text: "v2".to_string() });
}

#[test]
fn duplicate_renews_every_identifier() {
    let fragments: Vec<Fragment> = vec![
        ContentFragment::text("hello").into(),
        ContentFragment::error("boom").into(),
        ContentFragment::image(DataRef::url("https://example.com/a.png"), None, None, None).into(),
        AttachmentFragment::embed("a", "b", InlineData::text("c", None), EmbedMimeType::TextHtml, None).into(),
    ];

    let copies = duplicate_fragments(&fragments);

    assert_eq!(copies.len(), fragments.len());
    for (copy, original) in copies.iter().zip(&fragments) {
        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.part_kind(), original.part_kind());
        match (copy, original) {
            (Fragment::Content(c), Fragment::Content(o)) => assert_eq!(c.part, o.part),
            (Fragment::Attachment(c), Fragment::Attachment(o)) => {
                assert_eq!(c.title, o.title);
                assert_eq!(c.caption, o.caption);
                assert_eq!(c.created, o.created);
                assert_eq!(c.part, o.part);
            }
            _ => panic!("fragment kind changed during duplication"),
        }
    }
}

#[test]
fn type_guards() {
    let content: Fragment = ContentFragment::placeholder("wait").into();
    let attachment: Fragment =
        AttachmentFragment::image("i", "", DataRef::url("https://x/i.png"), None, None, None).into();

    assert!(content.is_content());
    assert!(!content.is_attachment());
    assert!(attachment.is_attachment());
    assert!(attachment.as_attachment().unwrap().part.is_image_ref());
    assert!(content.as_attachment().is_none());
}

#[test]
fn attachment_round_trips_through_json() {
    let fragment: Fragment = AttachmentFragment::embed(
        "lib.rs",
        "",
        InlineData::text("pub fn f() {}", None),
        EmbedMimeType::TextPlain,
        Some(EmbedMeta::named("lib.rs").with_code_language("rust")),
    )
    .into();

    let value = serde_json::to_value(&fragment).unwrap();
    assert_eq!(value["ft"], json!("attachment"));
    assert_eq!(value["title"], json!("lib.rs"));
    assert_eq!(value["caption"], json!(""));
    assert_eq!(value["part"]["pt"], json!("embed"));
    assert_eq!(value["part"]["emeta"]["codeLanguage"], json!("rust"));

    let parsed: Fragment = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, fragment);
}

#[test]
fn parses_stored_message_fragments() {
    let stored = json!([
        { "ft": "content", "fId": "aaaa1111", "part": { "pt": "text", "text": "hi" } },
        {
            "ft": "attachment", "fId": "bbbb2222", "title": "photo", "caption": "", "created": 1700000000000u64,
            "part": {
                "pt": "image_ref",
                "dataRef": { "reftype": "url", "url": "https://example.com/p.jpg" },
                "altText": "a photo"
            }
        }
    ]);

    let fragments: Vec<Fragment> = serde_json::from_value(stored).unwrap();

    assert_eq!(fragments[0].id().as_str(), "aaaa1111");
    let photo = fragments[1].as_attachment().unwrap();
    match &photo.part {
        AttachmentPart::ImageRef(image) => {
            assert_eq!(image.alt_text.as_deref(), Some("a photo"));
            assert_eq!(image.width, None);
        }
        other => panic!("unexpected part {:?}", other),
    }
}
