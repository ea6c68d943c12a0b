use rand::{distributions::Alphanumeric, thread_rng, Rng};

pub fn generate_30_alphanumeric() -> String {
    thread_rng().sample_iter(&Alphanumeric).take(30).map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::generate_30_alphanumeric;

    #[test]
    fn generates_distinct_alphanumeric_ids() {
        let first = generate_30_alphanumeric();
        let second = generate_30_alphanumeric();
        assert_eq!(first.len(), 30);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, second);
    }
}
