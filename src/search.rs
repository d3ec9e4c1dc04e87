use crate::models::VotingCenter;

/// Filters centers by name, number, or any person's name, designation or mobile.
/// Names and designations match case-insensitively; numbers match verbatim.
pub fn search<'a>(centers: &'a [VotingCenter], query: &str) -> Vec<&'a VotingCenter> {
    if query.is_empty() {
        return centers.iter().collect();
    }
    let lower = query.to_lowercase();
    centers
        .iter()
        .filter(|center| {
            center.name.to_lowercase().contains(&lower)
                || center.center_number.contains(query)
                || center.important_persons.iter().any(|p| {
                    p.name.to_lowercase().contains(&lower)
                        || p.mobile.contains(query)
                        || p.designation.to_lowercase().contains(&lower)
                })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total_centers: usize,
    pub total_personnel: usize,
}

pub fn stats(centers: &[VotingCenter]) -> Stats {
    Stats {
        total_centers: centers.len(),
        total_personnel: centers.iter().map(|c| c.important_persons.len()).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_centers;

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let centers = default_centers();
        let found: Vec<&str> = search(&centers, "").into_iter().map(|c| c.id.as_str()).collect();
        assert_eq!(found, ["1", "2", "3"]);
    }

    #[test]
    fn test_matches_person_fields_and_numbers() {
        let centers = default_centers();
        let by_mobile = search(&centers, "01512345681");
        assert_eq!(by_mobile.len(), 1);
        assert_eq!(by_mobile[0].id, "2");

        let by_number = search(&centers, "03");
        assert!(by_number.iter().any(|c| c.id == "3"));

        let by_designation = search(&centers, "পেট্রোল");
        assert_eq!(by_designation.len(), 1);
        assert_eq!(by_designation[0].id, "3");

        assert!(search(&centers, "nowhere").is_empty());
    }

    #[test]
    fn test_name_match_ignores_case() {
        let mut centers = default_centers();
        centers[0].name = "Patenga High School".to_string();
        assert_eq!(search(&centers, "PATENGA").len(), 1);
    }

    #[test]
    fn test_stats_counts_personnel() {
        let centers = default_centers();
        assert_eq!(
            stats(&centers),
            Stats {
                total_centers: 3,
                total_personnel: 5
            }
        );
    }
}
