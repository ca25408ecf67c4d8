//! Built-in seed catalog: five incident reports and four news sources.

use chrono::{DateTime, NaiveDate, Utc};
use pvdb_core::{
    AiAnalysis, Casualties, Coordinates, ExtractedInfo, Incident, NewsSource, Severity,
};

fn date(s: &str) -> NaiveDate {
    s.parse().expect("static seed date")
}

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("static seed timestamp")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// The seeded news sources, ids 1..=4.
#[must_use]
pub fn news_sources() -> Vec<NewsSource> {
    [
        ("প্রথম আলো", "prothomalo.com", "2025-01-15T08:00:00Z", 1200, 95),
        (
            "বাংলা ট্রিবিউন",
            "banglatribune.com",
            "2025-01-15T08:05:00Z",
            800,
            92,
        ),
        ("যুগান্তর", "jugantor.com", "2025-01-15T08:10:00Z", 900, 90),
        ("সমকাল", "samakal.com", "2025-01-15T08:20:00Z", 950, 91),
    ]
    .into_iter()
    .enumerate()
    .map(
        |(idx, (name, url, last_crawled, daily_articles, reliability))| NewsSource {
            id: idx as i64 + 1,
            name: name.to_string(),
            url: url.to_string(),
            status: "active".to_string(),
            kind: "national".to_string(),
            last_crawled: ts(last_crawled),
            daily_articles,
            reliability,
        },
    )
    .collect()
}

/// The seeded incident reports, ids 1..=5.
#[must_use]
pub fn incidents() -> Vec<Incident> {
    vec![
        Incident {
            id: 1,
            date: date("2025-01-15"),
            division: "ঢাকা".to_string(),
            district: "ঢাকা".to_string(),
            upazila: "ধানমন্ডি".to_string(),
            police_station: "ধানমন্ডি থানা".to_string(),
            location: "ঢাকা, ধানমন্ডি, ৩২ নম্বর রোড".to_string(),
            coordinates: Coordinates {
                lat: 23.7465,
                lng: 90.3768,
            },
            party: "বাংলাদেশ আওয়ামী লীগ".to_string(),
            killed: 2,
            injured: 8,
            description: "দলীয় কার্যালয়ের সামনে প্রতিপক্ষীয় গ্রুপের পরিকল্পিত আক্রমণে রক্তক্ষয়ী সংঘর্ষ। স্থানীয় নেতাদের মধ্যে ক্ষমতার দ্বন্দ্ব থেকে এই ঘটনার সূত্রপাত।".to_string(),
            severity: Severity::High,
            images: strings(&[
                "https://images.unsplash.com/photo-1586339949916-3e9457bef6d3?w=400",
                "https://images.unsplash.com/photo-1588681664899-f142ff2dc9b1?w=400",
            ]),
            news_source: "প্রথম আলো".to_string(),
            source_url: Some("https://www.prothomalo.com/politics/news-1".to_string()),
            ai_analysis: AiAnalysis {
                confidence: 0.94,
                key_entities: strings(&["ধানমন্ডি", "আওয়ামী লীগ", "সংঘর্ষ"]),
                sentiment: "very_negative".to_string(),
                processed_at: ts("2025-01-15T10:30:00Z"),
                extracted_info: ExtractedInfo {
                    casualties: Casualties {
                        killed: 2,
                        injured: 8,
                    },
                    location_confidence: 0.96,
                    party_confidence: 0.92,
                    violence_type: "দলীয় সংঘর্ষ".to_string(),
                },
            },
            crawled_at: ts("2025-01-15T09:15:00Z"),
            last_updated: ts("2025-01-15T11:00:00Z"),
            witnesses: strings(&["স্থানীয় দোকানদার", "পথচারী"]),
            police_response: Some("ঘটনাস্থলে অতিরিক্ত পুলিশ মোতায়েন".to_string()),
            tags: strings(&["দলীয় সংঘর্ষ", "ধানমন্ডি", "উচ্চ তীব্রতা"]),
        },
        Incident {
            id: 2,
            date: date("2025-01-14"),
            division: "চট্টগ্রাম".to_string(),
            district: "চট্টগ্রাম".to_string(),
            upazila: "পাঁচলাইশ".to_string(),
            police_station: "পাঁচলাইশ থানা".to_string(),
            location: "চট্টগ্রাম, পাঁচলাইশ, আগ্রাবাদ সি/এ".to_string(),
            coordinates: Coordinates {
                lat: 22.3569,
                lng: 91.7832,
            },
            party: "বাংলাদেশ জাতীয়তাবাদী দল".to_string(),
            killed: 1,
            injured: 12,
            description: "হরতাল সমর্থনে বিএনপির শান্তিপূর্ণ মিছিলে পুলিশের লাঠিচার্জ ও টিয়ার গ্যাস নিক্ষেপে উত্তেজনা বৃদ্ধি।".to_string(),
            severity: Severity::High,
            images: strings(&[
                "https://images.unsplash.com/photo-1590736969955-71cc94901144?w=400",
            ]),
            news_source: "যুগান্তর".to_string(),
            source_url: Some("https://www.jugantor.com/politics/news-2".to_string()),
            ai_analysis: AiAnalysis {
                confidence: 0.87,
                key_entities: strings(&["চট্টগ্রাম", "বিএনপি", "হরতাল", "পুলিশ"]),
                sentiment: "very_negative".to_string(),
                processed_at: ts("2025-01-14T14:20:00Z"),
                extracted_info: ExtractedInfo {
                    casualties: Casualties {
                        killed: 1,
                        injured: 12,
                    },
                    location_confidence: 0.89,
                    party_confidence: 0.95,
                    violence_type: "পুলিশি বাহিনীর সাথে সংঘর্ষ".to_string(),
                },
            },
            crawled_at: ts("2025-01-14T13:45:00Z"),
            last_updated: ts("2025-01-14T15:30:00Z"),
            witnesses: strings(&["সাংবাদিক", "স্থানীয় ব্যবসায়ী"]),
            police_response: Some("আরও বেশি টিয়ার গ্যাস নিক্ষেপ".to_string()),
            tags: strings(&["হরতাল", "পুলিশি সংঘর্ষ", "চট্টগ্রাম"]),
        },
        Incident {
            id: 3,
            date: date("2025-01-13"),
            division: "রাজশাহী".to_string(),
            district: "রাজশাহী".to_string(),
            upazila: "রাজশাহী সদর".to_string(),
            police_station: "শাহ মখদুম থানা".to_string(),
            location: "রাজশাহী, রাজশাহী সদর, শাহেব বাজার".to_string(),
            coordinates: Coordinates {
                lat: 24.3745,
                lng: 88.6042,
            },
            party: "জাতীয় পার্টি".to_string(),
            killed: 0,
            injured: 6,
            description: "স্থানীয় নেতাদের মধ্যে দলীয় দ্বন্দ্ব ও ক্ষমতার লড়াইয়ে সংঘর্ষ।".to_string(),
            severity: Severity::Medium,
            images: strings(&[
                "https://images.unsplash.com/photo-1590736969955-71cc94901144?w=400",
            ]),
            news_source: "সমকাল".to_string(),
            source_url: Some("https://www.samakal.com/politics/news-3".to_string()),
            ai_analysis: AiAnalysis {
                confidence: 0.82,
                key_entities: strings(&["রাজশাহী", "জাতীয় পার্টি", "দলীয় দ্বন্দ্ব"]),
                sentiment: "negative".to_string(),
                processed_at: ts("2025-01-13T12:30:00Z"),
                extracted_info: ExtractedInfo {
                    casualties: Casualties {
                        killed: 0,
                        injured: 6,
                    },
                    location_confidence: 0.85,
                    party_confidence: 0.79,
                    violence_type: "অভ্যন্তরীণ দলীয় সংঘর্ষ".to_string(),
                },
            },
            crawled_at: ts("2025-01-13T11:45:00Z"),
            last_updated: ts("2025-01-13T13:20:00Z"),
            witnesses: strings(&["দলীয় কর্মী", "স্থানীয় অধিবাসী"]),
            police_response: Some("মধ্যস্থতার চেষ্টা".to_string()),
            tags: strings(&["দলীয় দ্বন্দ্ব", "রাজশাহী", "মধ্যম তীব্রতা"]),
        },
        Incident {
            id: 4,
            date: date("2025-01-12"),
            division: "খুলনা".to_string(),
            district: "খুলনা".to_string(),
            upazila: "দৌলতপুর".to_string(),
            police_station: "দৌলতপুর থানা".to_string(),
            location: "খুলনা, দৌলতপুর, আইরন বাজার".to_string(),
            coordinates: Coordinates {
                lat: 22.8456,
                lng: 89.5403,
            },
            party: "বাংলাদেশ জাতীয়তাবাদী দল".to_string(),
            killed: 3,
            injured: 18,
            description: "পৌরসভা নির্বাচনে দুই প্রতিদ্বন্দ্বী গ্রুপের মধ্যে প্রাণঘাতী সংঘর্ষ।".to_string(),
            severity: Severity::High,
            images: strings(&[
                "https://images.unsplash.com/photo-1586339949916-3e9457bef6d3?w=400",
            ]),
            news_source: "বাংলা ট্রিবিউন".to_string(),
            source_url: Some("https://www.banglatribune.com/politics/news-4".to_string()),
            ai_analysis: AiAnalysis {
                confidence: 0.96,
                key_entities: strings(&["খুলনা", "বিএনপি", "পৌর নির্বাচন", "ভোট কেন্দ্র"]),
                sentiment: "very_negative".to_string(),
                processed_at: ts("2025-01-12T18:20:00Z"),
                extracted_info: ExtractedInfo {
                    casualties: Casualties {
                        killed: 3,
                        injured: 18,
                    },
                    location_confidence: 0.97,
                    party_confidence: 0.94,
                    violence_type: "নির্বাচনী সহিংসতা".to_string(),
                },
            },
            crawled_at: ts("2025-01-12T17:30:00Z"),
            last_updated: ts("2025-01-12T19:45:00Z"),
            witnesses: strings(&["নির্বাচন কমিশনের অফিসার", "ভোটার"]),
            police_response: Some("অতিরিক্ত ইউনিট মোতায়েন".to_string()),
            tags: strings(&["নির্বাচনী সহিংসতা", "খুলনা", "উচ্চ তীব্রতা"]),
        },
        Incident {
            id: 5,
            date: date("2025-01-11"),
            division: "বরিশাল".to_string(),
            district: "বরিশাল".to_string(),
            upazila: "বরিশাল সদর".to_string(),
            police_station: "কোতোয়ালী থানা".to_string(),
            location: "বরিশাল, বরিশাল সদর, বন্দর রোড".to_string(),
            coordinates: Coordinates {
                lat: 22.7010,
                lng: 90.3535,
            },
            party: "বাংলাদেশের কমিউনিস্ট পার্টি".to_string(),
            killed: 0,
            injured: 7,
            description: "শ্রমিক অধিকার নিয়ে সমাবেশে বিরোধী দলের হামলা ও পুলিশের হস্তক্ষেপ।".to_string(),
            severity: Severity::Medium,
            images: strings(&[
                "https://images.unsplash.com/photo-1590736969955-71cc94901144?w=400",
            ]),
            news_source: "মানবজমিন".to_string(),
            source_url: Some("https://www.manabzamin.com/politics/news-5".to_string()),
            ai_analysis: AiAnalysis {
                confidence: 0.78,
                key_entities: strings(&["বরিশাল", "কমিউনিস্ট পার্টি", "শ্রমিক সমাবেশ"]),
                sentiment: "negative".to_string(),
                processed_at: ts("2025-01-11T14:15:00Z"),
                extracted_info: ExtractedInfo {
                    casualties: Casualties {
                        killed: 0,
                        injured: 7,
                    },
                    location_confidence: 0.81,
                    party_confidence: 0.75,
                    violence_type: "শ্রমিক আন্দোলন সহিংসতা".to_string(),
                },
            },
            crawled_at: ts("2025-01-11T13:20:00Z"),
            last_updated: ts("2025-01-11T15:00:00Z"),
            witnesses: strings(&["শ্রমিক নেতা", "ট্রেড ইউনিয়ন কর্মী"]),
            police_response: Some("সমাবেশ ভেঙে দেওয়া".to_string()),
            tags: strings(&["শ্রমিক আন্দোলন", "বরিশাল", "মধ্যম তীব্রতা"]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique_and_monotonic() {
        let incidents = incidents();
        let ids: Vec<i64> = incidents.iter().map(|i| i.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
        let sources = news_sources();
        let ids: Vec<i64> = sources.iter().map(|s| s.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
    }

    #[test]
    fn seed_casualty_counts_are_non_negative_by_construction() {
        // u32 makes negatives unrepresentable; sanity-check the known sums
        let incidents = incidents();
        assert_eq!(incidents.iter().map(|i| i.killed).sum::<u32>(), 6);
        assert_eq!(incidents.iter().map(|i| i.injured).sum::<u32>(), 51);
    }

    #[test]
    fn seed_confidences_lie_in_unit_interval() {
        for incident in incidents() {
            let ai = &incident.ai_analysis;
            for c in [ai.confidence, ai.extracted_info.location_confidence, ai.extracted_info.party_confidence] {
                assert!((0.0..=1.0).contains(&c), "confidence {c} out of range");
            }
        }
    }
}
