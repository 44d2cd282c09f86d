use odyssee::{FetchOutcome, Language, OffersSection, RawOffer, ResolveConfig};
use serde_json::json;

fn raw_collection(value: serde_json::Value) -> Vec<RawOffer> {
    serde_json::from_value(value).expect("raw collection")
}

#[test]
fn full_pipeline_executes_with_defaults() {
    let raw = raw_collection(json!([
        {
            "id": "djerba",
            "title": "Djerba escape",
            "shortDescription": "Island beaches",
            "destination": "Djerba",
            "duration": 5,
            "stars": 4,
            "mainImageUrl": "https://cdn.example.com/djerba.jpg",
            "available": true,
            "createdAt": "2025-01-01T00:00:00Z",
            "translations": {
                "fr": {
                    "title": "Escapade à Djerba",
                    "shortDescription": "Plages de l'île",
                    "bigDescription": "Cinq jours au soleil",
                    "destination": "Djerba"
                },
                "de": {"title": "Djerba Urlaub"}
            }
        },
        {"id": "closed", "title": "Closed tour", "available": false},
        {"title": "no id at all", "available": true}
    ]));

    let section = OffersSection::assemble(
        FetchOutcome::ok(raw.clone()),
        Language::Fr,
        &ResolveConfig::default(),
    );
    let cards = section.cards();
    assert_eq!(cards.len(), 1);

    let card = &cards[0];
    assert_eq!(card.id, "djerba");
    assert_eq!(card.title, "Escapade à Djerba");
    assert_eq!(card.description, "Plages de l'île");
    assert_eq!(card.duration, "5 jours");
    assert_eq!(card.stars, "4 ⭐");
    assert_eq!(card.image, "https://cdn.example.com/djerba.jpg");
    assert_eq!(card.current_language, Language::Fr);
    assert_eq!(card.href, "/fr/offers/djerba");

    let cfg = ResolveConfig::default();
    let english = OffersSection::assemble(FetchOutcome::ok(raw), Language::En, &cfg);
    assert_eq!(english.cards()[0].title, "Djerba escape");
    assert_eq!(english.cards()[0].duration, "5 days");
    assert_eq!(english.cards()[0].current_language, Language::En);
}

#[test]
fn untranslated_offer_in_french() {
    let raw = raw_collection(json!([
        {"id": "a", "title": "X", "stars": 4, "duration": 3, "available": true}
    ]));
    let cfg = ResolveConfig::default();
    let section = OffersSection::assemble(FetchOutcome::ok(raw), Language::Fr, &cfg);

    let card = &section.cards()[0];
    assert_eq!(card.title, "X");
    assert_eq!(card.duration, "3 jours");
    assert_eq!(card.stars, "4 ⭐");
    assert_eq!(card.current_language, Language::En);
}

#[test]
fn search_narrows_the_section() {
    let raw = raw_collection(json!([
        {"id": "a", "title": "Sahara nights", "destination": "Douz", "available": true},
        {"id": "b", "title": "Medina walk", "destination": "Tunis", "available": true}
    ]));
    let cfg = ResolveConfig::default();

    let hits =
        OffersSection::assemble_matching(FetchOutcome::ok(raw.clone()), Language::En, &cfg, "tunis");
    assert_eq!(hits.cards().len(), 1);
    assert_eq!(hits.cards()[0].id, "b");

    let none = OffersSection::assemble_matching(FetchOutcome::ok(raw), Language::En, &cfg, "paris");
    assert!(none.is_empty());
}
