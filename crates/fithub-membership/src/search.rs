use fithub_domain::Member;

fn matches(member: &Member, needle: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);
    contains(&member.name)
        || member.email.as_deref().map_or(false, contains)
        || contains(&member.unique_id)
}

/// Narrow the working set to members whose name, email or
/// unique id contains the query, ignoring case. A blank
/// query keeps every member.
pub fn filter_members(members: &[Member], query: &str) -> Vec<Member> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return members.to_vec();
    }
    members
        .iter()
        .filter(|m| matches(m, &needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members() -> Vec<Member> {
        vec![
            Member {
                id: 1,
                unique_id: "FH10001".to_string(),
                name: "John Doe".to_string(),
                ..Default::default()
            },
            Member {
                id: 2,
                unique_id: "FH10002".to_string(),
                name: "Emma Wilson".to_string(),
                email: Some("emma.w@example.com".to_string()),
                ..Default::default()
            },
            Member {
                id: 3,
                unique_id: "FH10003".to_string(),
                name: "Michael Smith".to_string(),
                email: Some("mike@johnson-gym.com".to_string()),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_empty_query_is_identity() {
        assert_eq!(filter_members(&members(), ""), members());
        assert_eq!(filter_members(&members(), "   "), members());
    }

    #[test]
    fn test_case_insensitive_or() {
        let found = filter_members(&members(), "JOHN");
        let ids: Vec<u32> = found.iter().map(|m| m.id).collect();
        // Name of 1, email of 3
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_unique_id_and_email() {
        let found = filter_members(&members(), "fh10002");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Emma Wilson");

        let found = filter_members(&members(), "example.com");
        assert_eq!(found.len(), 1);

        assert!(filter_members(&members(), "nobody").is_empty());
    }
}
