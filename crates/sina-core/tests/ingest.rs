use serde_json::json;
use sina_core::error::CoreError;
use sina_core::ingest::{ingest_json, ingest_value, ingest_values, parse_timestamp};
use sina_core::models::medication::DoseTime;
use sina_core::models::scale::ScaleId;

fn stored(id: &str, date: &str, tc: &str) -> serde_json::Value {
    json!({
        "degerlendirmeMeta": { "kayitId": id, "degerlendirmeTarihi": date },
        "hastaBilgileri": { "sosyodemografik": { "tcKimlikNo": tc, "adSoyad": "Ayşe Yılmaz" } },
        "klinikOlcekSonuclari": {
            "GAF": { "hamSkor": 65 },
            "YMRS": { "hamSkor": 4 },
            "HDRS": { "hamSkor": 9 }
        },
        "tedaviKayitlari": {
            "ilaclar": [
                { "ad": "Lityum", "doz": "900", "zamanlar": ["Sabah", "Gece"] },
                { "ad": "", "doz": "", "zamanlar": [] }
            ],
            "not": "  Stable on current plan.  "
        }
    })
}

#[test]
fn full_document_is_ingested() {
    let record = ingest_value(stored(
        "6f9619ff-8b86-d011-b42d-00cf4fc964ff",
        "2024-03-01T09:30:00",
        "12345678901",
    ))
    .unwrap();

    assert_eq!(record.id.to_string(), "6f9619ff-8b86-d011-b42d-00cf4fc964ff");
    assert_eq!(record.national_id(), Some("12345678901"));
    assert_eq!(record.patient.display_name, "Ayşe Yılmaz");
    assert_eq!(record.assessed_at.to_string(), "2024-03-01T09:30:00Z");
    assert_eq!(record.scales.get(ScaleId::Gaf), Some(65.0));
    assert_eq!(record.scales.get(ScaleId::Hdrs), Some(9.0));
    assert_eq!(record.scales.get(ScaleId::Sao), None);
    assert_eq!(record.note.as_deref(), Some("Stable on current plan."));

    // The nameless medication row is dropped.
    assert_eq!(record.medications.len(), 1);
    assert_eq!(record.medications[0].name, "Lityum");
    assert_eq!(record.medications[0].dose, "900");
    assert_eq!(
        record.medications[0].times,
        vec![DoseTime::Morning, DoseTime::Night]
    );
}

#[test]
fn legacy_alda_parts_are_upgraded() {
    let record = ingest_value(json!({
        "degerlendirmeMeta": { "degerlendirmeTarihi": "2023-11-20" },
        "klinikOlcekSonuclari": {
            "ALDA_A": { "hamSkor": 8 },
            "ALDA_B": { "hamSkor": 3 }
        }
    }))
    .unwrap();

    assert_eq!(record.scales.get(ScaleId::Alda), Some(5.0));
    assert!(!record.scales.contains(ScaleId::AldaA));
    assert!(!record.scales.contains(ScaleId::AldaB));
}

#[test]
fn unreadable_scale_values_fall_back() {
    let record = ingest_value(json!({
        "degerlendirmeMeta": { "degerlendirmeTarihi": "2023-11-20" },
        "klinikOlcekSonuclari": {
            "GAF": { "hamSkor": null },
            "YMRS": { "hamSkor": "14" },
            "PANSS": { "hamSkor": 80 }
        }
    }))
    .unwrap();

    // A recognised scale keeps its place with the fallback value.
    assert_eq!(record.scales.get(ScaleId::Gaf), Some(55.0));
    assert_eq!(record.scales.get(ScaleId::Ymrs), Some(14.0));
    assert_eq!(record.scales.len(), 2);
}

#[test]
fn only_unreadable_scales_still_count_as_recorded() {
    let record = ingest_value(json!({
        "degerlendirmeMeta": { "degerlendirmeTarihi": "2023-11-20" },
        "klinikOlcekSonuclari": { "YMRS": {}, "HDRS": { "hamSkor": "n/a" } }
    }))
    .unwrap();

    assert!(!record.scales.is_empty());
    assert_eq!(record.scales.get(ScaleId::Ymrs), Some(0.0));
    assert_eq!(record.scales.get(ScaleId::Hdrs), Some(0.0));
}

#[test]
fn null_sections_read_as_empty() {
    let report = ingest_values(vec![
        json!({
            "degerlendirmeMeta": { "degerlendirmeTarihi": "2024-01-01" },
            "hastaBilgileri": null,
            "klinikOlcekSonuclari": null,
            "tedaviKayitlari": null
        }),
        json!({
            "degerlendirmeMeta": { "degerlendirmeTarihi": "2024-01-02" },
            "hastaBilgileri": { "sosyodemografik": null },
            "tedaviKayitlari": { "ilaclar": null, "not": null }
        }),
        json!({
            "degerlendirmeMeta": { "degerlendirmeTarihi": "2024-01-03" },
            "hastaBilgileri": { "sosyodemografik": { "tcKimlikNo": "1", "adSoyad": null } },
            "tedaviKayitlari": {
                "ilaclar": [
                    null,
                    { "ad": "Lityum", "doz": null, "zamanlar": null },
                    { "ad": "Ketiapin", "doz": "100", "zamanlar": [null, "Gece", 3] }
                ]
            }
        }),
    ]);

    assert!(report.rejected.is_empty(), "{:?}", report.rejected);
    assert_eq!(report.records.len(), 3);

    let empty = &report.records[0];
    assert!(empty.scales.is_empty());
    assert!(empty.medications.is_empty());
    assert_eq!(empty.national_id(), None);
    assert_eq!(report.records[1].note, None);

    let meds = &report.records[2].medications;
    assert_eq!(meds.len(), 2);
    assert_eq!(meds[0].dose, "");
    assert!(meds[0].times.is_empty());
    assert_eq!(meds[1].times, vec![DoseTime::Night]);
}

#[test]
fn numeric_national_id_and_blank_id() {
    let numeric = ingest_value(stored("x", "2024-01-01", "0")).unwrap();
    assert_eq!(numeric.national_id(), Some("0"));

    let mut doc = stored("x", "2024-01-01", "");
    doc["hastaBilgileri"]["sosyodemografik"]["tcKimlikNo"] = json!(98765);
    let record = ingest_value(doc).unwrap();
    assert_eq!(record.national_id(), Some("98765"));

    let blank = ingest_value(stored("x", "2024-01-01", "   ")).unwrap();
    assert_eq!(blank.national_id(), None);
}

#[test]
fn bad_timestamp_rejects_only_that_record() {
    let report = ingest_values(vec![
        stored("a", "2024-01-01T10:00:00", "1"),
        stored("b", "not a date", "1"),
        json!({ "degerlendirmeMeta": { "kayitId": "c" } }),
        stored("d", "2024-02-01", "1"),
    ]);

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.rejected.len(), 2);
    assert_eq!(report.rejected[0].index, 1);
    assert_eq!(report.rejected[0].record_id.as_deref(), Some("b"));
    assert_eq!(report.rejected[1].index, 2);
    assert!(report.rejected[1].reason.contains("degerlendirmeTarihi"));
}

#[test]
fn structurally_broken_document_is_rejected() {
    let report = ingest_values(vec![json!({
        "degerlendirmeMeta": { "degerlendirmeTarihi": "2024-01-01" },
        "tedaviKayitlari": { "ilaclar": "lithium" }
    })]);
    assert!(report.records.is_empty());
    assert_eq!(report.rejected.len(), 1);
}

#[test]
fn ingest_json_requires_array() {
    let err = ingest_json("{\"a\": 1}").unwrap_err();
    assert!(matches!(err, CoreError::NotAnArray(_)));

    let report = ingest_json("[]").unwrap();
    assert!(report.records.is_empty());
    assert!(report.rejected.is_empty());
}

#[test]
fn timestamp_formats() {
    let instant = parse_timestamp("2024-05-01T10:00:00+03:00").unwrap();
    assert_eq!(instant.to_string(), "2024-05-01T07:00:00Z");

    let civil = parse_timestamp("2024-05-01T10:00:00").unwrap();
    assert_eq!(civil.to_string(), "2024-05-01T10:00:00Z");

    let date = parse_timestamp("2024-05-01").unwrap();
    assert_eq!(date.to_string(), "2024-05-01T00:00:00Z");

    assert!(matches!(
        parse_timestamp("01/05/2024"),
        Err(CoreError::InvalidTimestamp { .. })
    ));
}
