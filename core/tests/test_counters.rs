#[cfg(test)]
mod tests {
    use traffic_commands::counters::Counters;
    use traffic_commands::types::CommandError;

    #[test]
    fn bit_positions() {
        assert_eq!(Counters::LOCAL_MULTICAST.bits(), 1 << 0);
        assert_eq!(Counters::DROPPED_FIXED_ROUTE.bits(), 1 << 11);
        assert_eq!(Counters::COUNTER15.bits(), 1 << 15);
        assert_eq!(Counters::SENT.bits(), 1 << 16);
        assert_eq!(Counters::BLOCKED.bits(), 1 << 17);
        assert_eq!(Counters::RECEIVED.bits(), 1 << 24);
        assert_eq!(Counters::all().iter_names().count(), 19);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Counters::from_counter_name("sent").unwrap(), Counters::SENT);
        assert_eq!(Counters::from_counter_name("SENT").unwrap(), Counters::SENT);
        assert_eq!(
            Counters::from_counter_name("local_nearest_neighbour").unwrap(),
            Counters::LOCAL_NEAREST_NEIGHBOUR
        );
    }

    #[test]
    fn generator_counters_by_name() {
        assert_eq!(Counters::from_counter_name("sent").unwrap().bits(), 1 << 16);
        assert_eq!(Counters::from_counter_name("blocked").unwrap().bits(), 1 << 17);
        assert_eq!(Counters::from_counter_name("received").unwrap().bits(), 1 << 24);
    }

    #[test]
    fn names_are_ored() {
        let mask = Counters::from_counter_names(["local_multicast", "sent"]).unwrap();
        assert_eq!(mask.bits(), (1 << 0) | (1 << 16));

        let empty = Counters::from_counter_names(Vec::<&str>::new()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = Counters::from_counter_names(["sent", "bogus"]).unwrap_err();
        assert_eq!(err, CommandError::UnknownCounter("bogus".into()));
    }

    #[test]
    fn counter_names_roundtrip_through_lookup() {
        let mask = Counters::RECEIVED | Counters::BLOCKED | Counters::DROPPED_P2P;
        let names = mask.counter_names();
        assert_eq!(
            names,
            vec!["dropped_p2p".to_string(), "blocked".to_string(), "received".to_string()]
        );
        assert_eq!(Counters::from_counter_names(&names).unwrap(), mask);
    }
}
