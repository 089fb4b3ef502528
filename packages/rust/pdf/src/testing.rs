//! In-memory PDF builders for tests.
//!
//! Each page carries one line of Helvetica text so `extract_text` finds it.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

/// A flat PDF: one `Pages` node, one page per entry of `texts`.
pub fn build_text_pdf(texts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let resources_id = add_font_resources(&mut doc);

    let kids: Vec<Object> = texts
        .iter()
        .map(|text| {
            let page_id = add_page(&mut doc, pages_id, text);
            if let Ok(page) = doc.get_object_mut(page_id).and_then(Object::as_dict_mut) {
                page.set("Resources", Object::Reference(resources_id));
                page.set("MediaBox", media_box());
            }
            Object::Reference(page_id)
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => Object::Integer(texts.len() as i64),
            "Kids" => kids,
        }),
    );

    finish(doc, pages_id)
}

/// A PDF whose pages sit under an intermediate `Pages` node and inherit
/// `Resources` and `MediaBox` from the root.
pub fn build_nested_text_pdf(texts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let root_id = doc.new_object_id();
    let branch_id = doc.new_object_id();
    let resources_id = add_font_resources(&mut doc);

    let kids: Vec<Object> = texts
        .iter()
        .map(|text| Object::Reference(add_page(&mut doc, branch_id, text)))
        .collect();

    doc.objects.insert(
        branch_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Parent" => Object::Reference(root_id),
            "Count" => Object::Integer(texts.len() as i64),
            "Kids" => kids,
        }),
    );
    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => Object::Integer(texts.len() as i64),
            "Kids" => vec![Object::Reference(branch_id)],
            "Resources" => Object::Reference(resources_id),
            "MediaBox" => media_box(),
        }),
    );

    finish(doc, root_id)
}

fn add_font_resources(doc: &mut Document) -> ObjectId {
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => Object::Reference(font_id) },
    })
}

fn add_page(doc: &mut Document, parent: ObjectId, text: &str) -> ObjectId {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(text.as_bytes().to_vec(), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ],
    };
    let encoded = content.encode().expect("encode content stream");
    let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(parent),
        "Contents" => Object::Reference(content_id),
    })
}

fn media_box() -> Object {
    vec![0.into(), 0.into(), 612.into(), 792.into()].into()
}

fn finish(mut doc: Document, pages_id: ObjectId) -> Vec<u8> {
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("save test PDF");
    buffer
}
