use cardsheet::{Card, ContentBlock, ReferencePair, SheetEntry};
use serde_json::{json, Value};

/// A card with `blocks` paragraphs, ids `"{id}/{i}"`.
pub fn card(id: &str, blocks: usize) -> Card {
    let front = (0..blocks)
        .map(|i| ContentBlock::paragraph(format!("{id}/{i}"), format!("paragraph {i} of {id}")))
        .collect();
    Card::new(id, front).with_title(id.to_uppercase())
}

pub fn cards(count: usize, blocks: usize) -> Vec<SheetEntry> {
    (0..count)
        .map(|i| card(&format!("card-{i}"), blocks).into())
        .collect()
}

pub fn reference(id: &str) -> SheetEntry {
    ReferencePair {
        id: id.into(),
        title: format!("{id} reference"),
    }
    .into()
}

/// A small spell deck in the deck file format.
pub fn spell_deck() -> Value {
    json!({
        "pageSize": "letter",
        "options": { "sideBySide": true },
        "card": { "width": 80.0, "height": 120.0 },
        "blockHeights": {
            "wish/0": 30.0,
            "wish/1": 30.0,
            "wish/2": 30.0,
            "wish/3": 30.0
        },
        "entries": [
            { "type": "card", "id": "light", "title": "Light",
              "front": [{ "id": "light/0", "markup": "The target sheds bright light." }] },
            { "type": "card", "id": "shield", "title": "Shield",
              "front": [{ "id": "shield/0", "markup": "+5 to AC." }] },
            { "type": "card", "id": "wish", "title": "Wish", "accent": "#7a3fbf",
              "front": [
                  { "id": "wish/0", "markup": "Wish is the mightiest spell." },
                  { "id": "wish/1", "markup": "Duplicate any other spell." },
                  { "id": "wish/2", "kind": "list", "markup": "<ul>...</ul>" },
                  { "id": "wish/3", "markup": "The stress of casting wish..." }
              ] },
            { "type": "reference", "id": "conditions", "title": "Conditions" }
        ]
    })
}
