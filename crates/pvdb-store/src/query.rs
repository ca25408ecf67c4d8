//! Query/filter engine: predicate matching, sorting, pagination.
//!
//! Pure functions over incident slices; the [`Store`](crate::Store) wraps
//! them behind its lock.

use pvdb_core::{Incident, IncidentFilter, SortKey};
use serde::Serialize;

/// One page of query results plus the pre-pagination match count.
#[derive(Debug, Clone, Serialize)]
pub struct IncidentPage {
    pub incidents: Vec<Incident>,
    pub total: u64,
}

/// Whether a record satisfies every predicate the filter supplies.
///
/// Absent fields impose no constraint; supplied predicates AND together.
#[must_use]
pub fn matches(incident: &Incident, filter: &IncidentFilter) -> bool {
    if let Some(term) = &filter.search {
        let term = term.to_lowercase();
        let hit = incident.location.to_lowercase().contains(&term)
            || incident.description.to_lowercase().contains(&term)
            || incident.party.to_lowercase().contains(&term)
            || incident
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&term));
        if !hit {
            return false;
        }
    }

    if let Some(division) = &filter.division {
        if incident.division != *division {
            return false;
        }
    }

    if let Some(district) = &filter.district {
        if incident.district != *district {
            return false;
        }
    }

    if let Some(party) = &filter.party {
        if incident.party != *party {
            return false;
        }
    }

    if let Some(severities) = &filter.severity {
        if !severities.is_empty() && !severities.contains(&incident.severity) {
            return false;
        }
    }

    if let Some(from) = filter.date_from {
        if incident.date < from {
            return false;
        }
    }

    if let Some(to) = filter.date_to {
        if incident.date > to {
            return false;
        }
    }

    if filter.fatal_only.unwrap_or(false) && incident.killed == 0 {
        return false;
    }

    if filter.injured_only.unwrap_or(false) && incident.injured == 0 {
        return false;
    }

    true
}

/// Sorts descending by the chosen key. The sort is stable, so records that
/// compare equal keep their original relative order.
pub fn sort(incidents: &mut [Incident], key: SortKey) {
    match key {
        SortKey::Date => incidents.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::Severity => incidents.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank())),
        SortKey::Casualties => incidents.sort_by(|a, b| b.casualties().cmp(&a.casualties())),
    }
}

/// Returns the 1-indexed page slice `[(page-1)*limit, page*limit)`.
///
/// Out-of-range pages yield an empty vector, not an error.
#[must_use]
pub fn paginate(incidents: Vec<Incident>, page: u64, limit: u64) -> Vec<Incident> {
    let start = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    incidents.into_iter().skip(start).take(take).collect()
}

/// Applies the full filter specification: predicates, sort, pagination.
///
/// `total` reflects the filtered set before the page slice is taken.
#[must_use]
pub fn run(mut incidents: Vec<Incident>, filter: &IncidentFilter) -> IncidentPage {
    incidents.retain(|incident| matches(incident, filter));
    sort(&mut incidents, filter.sort_key());
    let total = incidents.len() as u64;
    let incidents = paginate(incidents, filter.page(), filter.limit());
    IncidentPage { incidents, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use pvdb_core::Severity;

    fn seeded() -> Vec<Incident> {
        seed::incidents()
    }

    #[test]
    fn no_filter_matches_everything() {
        let filter = IncidentFilter::default();
        assert!(seeded().iter().all(|i| matches(i, &filter)));
    }

    #[test]
    fn search_matches_any_text_field_case_insensitively() {
        let mut incidents = seeded();
        incidents[0].location = "Dhanmondi Road 32".to_string();
        let filter = IncidentFilter {
            search: Some("dhanmondi".to_string()),
            ..IncidentFilter::default()
        };
        assert!(matches(&incidents[0], &filter));

        // tag-only hit
        let mut tagged = seeded().remove(2);
        tagged.tags = vec!["Hartal".to_string()];
        let filter = IncidentFilter {
            search: Some("hartal".to_string()),
            ..IncidentFilter::default()
        };
        assert!(matches(&tagged, &filter));

        let filter = IncidentFilter {
            search: Some("no-such-term".to_string()),
            ..IncidentFilter::default()
        };
        assert!(seeded().iter().all(|i| !matches(i, &filter)));
    }

    #[test]
    fn predicates_combine_with_and() {
        // severity=[high] AND fatal_only over the seed catalog: exactly the
        // high-severity records with killed > 0, date descending by default.
        let filter = IncidentFilter {
            severity: Some(vec![Severity::High]),
            fatal_only: Some(true),
            ..IncidentFilter::default()
        };
        let page = run(seeded(), &filter);
        assert_eq!(page.total, 3);
        assert!(page
            .incidents
            .iter()
            .all(|i| i.severity == Severity::High && i.killed > 0));
        let dates: Vec<String> = page.incidents.iter().map(|i| i.date.to_string()).collect();
        assert_eq!(dates, ["2025-01-15", "2025-01-14", "2025-01-12"]);
    }

    #[test]
    fn empty_severity_set_means_no_constraint() {
        let filter = IncidentFilter {
            severity: Some(vec![]),
            ..IncidentFilter::default()
        };
        assert_eq!(run(seeded(), &filter).total, 5);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let filter = IncidentFilter {
            date_from: Some("2025-01-12".parse().unwrap()),
            date_to: Some("2025-01-14".parse().unwrap()),
            ..IncidentFilter::default()
        };
        let page = run(seeded(), &filter);
        assert_eq!(page.total, 3);
        let dates: Vec<String> = page.incidents.iter().map(|i| i.date.to_string()).collect();
        assert_eq!(dates, ["2025-01-14", "2025-01-13", "2025-01-12"]);
    }

    #[test]
    fn injured_only_drops_records_without_injuries() {
        let mut incidents = seeded();
        incidents[0].injured = 0;
        let filter = IncidentFilter {
            injured_only: Some(true),
            ..IncidentFilter::default()
        };
        assert_eq!(run(incidents, &filter).total, 4);
    }

    #[test]
    fn division_district_party_are_exact_equality() {
        let filter = IncidentFilter {
            division: Some("চট্টগ্রাম".to_string()),
            ..IncidentFilter::default()
        };
        let page = run(seeded(), &filter);
        assert_eq!(page.total, 1);
        assert_eq!(page.incidents[0].district, "চট্টগ্রাম");

        let filter = IncidentFilter {
            party: Some("বাংলাদেশ জাতীয়তাবাদী দল".to_string()),
            ..IncidentFilter::default()
        };
        assert_eq!(run(seeded(), &filter).total, 2);
    }

    #[test]
    fn casualties_sort_is_non_increasing_and_stable() {
        let filter = IncidentFilter {
            sort_by: Some(SortKey::Casualties),
            ..IncidentFilter::default()
        };
        let page = run(seeded(), &filter);
        let totals: Vec<u32> = page.incidents.iter().map(Incident::casualties).collect();
        assert!(totals.windows(2).all(|w| w[0] >= w[1]));

        // two records tie on casualties: original relative order survives
        let mut incidents = seeded();
        incidents[1].killed = incidents[0].killed;
        incidents[1].injured = incidents[0].injured;
        let first_id = incidents[0].id;
        let second_id = incidents[1].id;
        let page = run(incidents, &filter);
        let tied: Vec<i64> = page
            .incidents
            .iter()
            .filter(|i| [first_id, second_id].contains(&i.id))
            .map(|i| i.id)
            .collect();
        assert_eq!(tied, [first_id, second_id]);
    }

    #[test]
    fn severity_sort_uses_fixed_rank() {
        let filter = IncidentFilter {
            sort_by: Some(SortKey::Severity),
            ..IncidentFilter::default()
        };
        let page = run(seeded(), &filter);
        let ranks: Vec<u8> = page.incidents.iter().map(|i| i.severity.rank()).collect();
        assert!(ranks.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn pagination_slices_after_filter_and_total_is_pre_slice() {
        let filter = IncidentFilter {
            page: Some(2),
            limit: Some(2),
            ..IncidentFilter::default()
        };
        let page = run(seeded(), &filter);
        assert_eq!(page.total, 5);
        assert_eq!(page.incidents.len(), 2);
        // default sort is date descending: page 2 holds zero-based indices 2-3
        let dates: Vec<String> = page.incidents.iter().map(|i| i.date.to_string()).collect();
        assert_eq!(dates, ["2025-01-13", "2025-01-12"]);
    }

    #[test]
    fn out_of_range_page_yields_empty_slice() {
        let filter = IncidentFilter {
            page: Some(99),
            limit: Some(10),
            ..IncidentFilter::default()
        };
        let page = run(seeded(), &filter);
        assert_eq!(page.total, 5);
        assert!(page.incidents.is_empty());
    }
}
