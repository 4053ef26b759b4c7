use crate::models::{Listing, ListingStatus};

const AVAILABLE_NOTE: &str = "Confirmed: Unit is active. Verified visit window Sat @ 11:30 AM.";
const TAKEN_NOTE: &str = "Update: Owner reports unit just rented. Removing from sequence.";

/// How the landlord answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutreachVerdict {
    Available,
    Taken,
}

impl OutreachVerdict {
    /// "AVAILABLE" anywhere in the reply, unless "SOLD OUT" is also there.
    /// Case-insensitive.
    pub fn classify(reply: &str) -> Self {
        let reply = reply.to_uppercase();
        if reply.contains("AVAILABLE") && !reply.contains("SOLD OUT") {
            OutreachVerdict::Available
        } else {
            OutreachVerdict::Taken
        }
    }

    pub fn status(self) -> ListingStatus {
        match self {
            OutreachVerdict::Available => ListingStatus::Replied,
            OutreachVerdict::Taken => ListingStatus::Rejected,
        }
    }

    pub fn note(self) -> &'static str {
        match self {
            OutreachVerdict::Available => AVAILABLE_NOTE,
            OutreachVerdict::Taken => TAKEN_NOTE,
        }
    }
}

/// Copy of `listings` with the verdict applied to the listing whose id matches.
/// Order and every other listing are unchanged.
pub fn apply_verdict(listings: &[Listing], id: &str, verdict: OutreachVerdict) -> Vec<Listing> {
    listings
        .iter()
        .map(|listing| {
            if listing.id == id {
                Listing {
                    status: verdict.status(),
                    agent_note: Some(verdict.note().to_string()),
                    ..listing.clone()
                }
            } else {
                listing.clone()
            }
        })
        .collect()
}

/// Listings the landlord confirmed
pub fn verified_schedule(listings: &[Listing]) -> Vec<&Listing> {
    listings
        .iter()
        .filter(|l| l.status == ListingStatus::Replied)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Unit {id}"),
            ..Default::default()
        }
    }

    #[test]
    fn classifies_replies() {
        assert_eq!(OutreachVerdict::classify("Unit is AVAILABLE now"), OutreachVerdict::Available);
        assert_eq!(OutreachVerdict::classify("yes, still available!"), OutreachVerdict::Available);
        assert_eq!(OutreachVerdict::classify("AVAILABLE but SOLD OUT"), OutreachVerdict::Taken);
        assert_eq!(OutreachVerdict::classify("Sorry, sold out"), OutreachVerdict::Taken);
        assert_eq!(OutreachVerdict::classify("We rented it yesterday."), OutreachVerdict::Taken);
        assert_eq!(OutreachVerdict::classify(""), OutreachVerdict::Taken);
    }

    #[test]
    fn verdict_sets_status_and_note() {
        assert_eq!(OutreachVerdict::Available.status(), ListingStatus::Replied);
        assert_eq!(OutreachVerdict::Taken.status(), ListingStatus::Rejected);
        assert!(OutreachVerdict::Available.note().starts_with("Confirmed"));
        assert!(OutreachVerdict::Taken.note().starts_with("Update"));
    }

    #[test]
    fn apply_touches_only_the_matching_id() {
        let listings = vec![listing("a"), listing("b"), listing("c")];

        let updated = apply_verdict(&listings, "b", OutreachVerdict::Available);

        assert_eq!(updated.len(), 3);
        assert_eq!(updated[0], listings[0]);
        assert_eq!(updated[2], listings[2]);
        assert_eq!(updated[1].status, ListingStatus::Replied);
        assert_eq!(updated[1].agent_note.as_deref(), Some(AVAILABLE_NOTE));
        // input is left alone
        assert_eq!(listings[1].status, ListingStatus::New);
    }

    #[test]
    fn apply_with_unknown_id_is_identity() {
        let listings = vec![listing("a")];
        assert_eq!(apply_verdict(&listings, "zz", OutreachVerdict::Taken), listings);
    }

    #[test]
    fn schedule_is_exactly_the_replied_listings() {
        let listings = vec![listing("a"), listing("b"), listing("c")];
        let listings = apply_verdict(&listings, "a", OutreachVerdict::Available);
        let listings = apply_verdict(&listings, "b", OutreachVerdict::Taken);
        let listings = apply_verdict(&listings, "c", OutreachVerdict::Available);

        let ids: Vec<_> = verified_schedule(&listings).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
