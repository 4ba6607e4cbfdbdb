//! Cohort and status classification of person records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use flock_domain::{present, Gender, MemberStatus, Network, PersonRecord};

/// Counts per cohort and per status. Every known bucket is present, zero when empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CohortTally {
    pub cohorts: BTreeMap<Network, usize>,
    pub statuses: BTreeMap<MemberStatus, usize>,
    /// People that landed in no cohort bucket.
    pub unclassified_cohort: usize,
    /// People that landed in no status bucket.
    pub unclassified_status: usize,
}

impl Default for CohortTally {
    fn default() -> Self {
        Self {
            cohorts: Network::ALL.iter().map(|network| (*network, 0)).collect(),
            statuses: MemberStatus::ALL.iter().map(|status| (*status, 0)).collect(),
            unclassified_cohort: 0,
            unclassified_status: 0,
        }
    }
}

impl CohortTally {
    pub fn cohort(&self, network: Network) -> usize {
        self.cohorts.get(&network).copied().unwrap_or(0)
    }

    pub fn status(&self, status: MemberStatus) -> usize {
        self.statuses.get(&status).copied().unwrap_or(0)
    }
}

pub struct CohortService;

impl CohortService {
    /// Cohort for a person.
    ///
    /// An explicit network label wins. Without one, gender decides between the men's
    /// and women's networks. A person with neither is left out of the cohort tally on
    /// purpose: there is no "unknown" bucket. A label that is present but not recognized
    /// also excludes the person; gender is only consulted when the label is absent.
    pub fn classify(person: &PersonRecord) -> Option<Network> {
        match present(person.network.as_deref()) {
            Some(label) => label.parse().ok(),
            None => match person.parsed_gender()? {
                Gender::Male => Some(Network::Men),
                Gender::Female => Some(Network::Women),
            },
        }
    }

    /// Status bucket for a person; no fallback.
    pub fn status(person: &PersonRecord) -> Option<MemberStatus> {
        person.member_status()
    }

    pub fn tally(people: &[PersonRecord]) -> CohortTally {
        let mut tally = CohortTally::default();
        for person in people {
            match Self::classify(person) {
                Some(network) => *tally.cohorts.entry(network).or_insert(0) += 1,
                None => {
                    debug!(person = %person.id, "person excluded from cohort tally");
                    tally.unclassified_cohort += 1;
                }
            }
            match Self::status(person) {
                Some(status) => *tally.statuses.entry(status).or_insert(0) += 1,
                None => {
                    debug!(person = %person.id, "person excluded from status tally");
                    tally.unclassified_status += 1;
                }
            }
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_label_wins_over_gender() {
        let person = PersonRecord::new("Rui").with_network("youth").with_gender("male");
        assert_eq!(CohortService::classify(&person), Some(Network::Youth));
    }

    #[test]
    fn gender_is_the_fallback() {
        let man = PersonRecord::new("Rui").with_gender("M");
        let woman = PersonRecord::new("Ana").with_network("  ").with_gender("feminino");
        assert_eq!(CohortService::classify(&man), Some(Network::Men));
        assert_eq!(CohortService::classify(&woman), Some(Network::Women));
    }

    #[test]
    fn unlabelled_people_without_gender_are_dropped() {
        let nobody = PersonRecord::new("Sam");
        let unknown_gender = PersonRecord::new("Alex").with_gender("other");
        let unknown_label = PersonRecord::new("Jo").with_network("choir").with_gender("female");
        assert_eq!(CohortService::classify(&nobody), None);
        assert_eq!(CohortService::classify(&unknown_gender), None);
        assert_eq!(CohortService::classify(&unknown_label), None);
    }

    #[test]
    fn tally_counts_every_bucket() {
        let people = vec![
            PersonRecord::new("A").with_gender("male").with_status("member"),
            PersonRecord::new("B").with_network("women").with_status("leader"),
            PersonRecord::new("C").with_network("teens").with_status("visitor"),
            PersonRecord::new("D").with_status("member"),
            PersonRecord::new("E").with_gender("female").with_status("elder"),
        ];
        let tally = CohortService::tally(&people);
        assert_eq!(tally.cohort(Network::Men), 1);
        assert_eq!(tally.cohort(Network::Women), 2);
        assert_eq!(tally.cohort(Network::Teens), 1);
        assert_eq!(tally.cohort(Network::Children), 0);
        assert_eq!(tally.unclassified_cohort, 1);
        assert_eq!(tally.status(MemberStatus::Member), 2);
        assert_eq!(tally.status(MemberStatus::Leader), 1);
        assert_eq!(tally.status(MemberStatus::Visitor), 1);
        assert_eq!(tally.unclassified_status, 1);
        assert_eq!(tally.cohorts.len(), Network::ALL.len());
    }
}
