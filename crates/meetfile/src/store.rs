//! Data access for exports.
//!
//! The exporter is handed a [`MeetDataSource`] at construction instead of
//! reaching for a shared service, so every export reads from exactly the
//! collaborator it was given.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::StoreError;
use crate::models::{Meet, RelayTeam, SwimClub, SwimEvent, Swimmer, SwimmerMeetEvent};

#[async_trait]
pub trait MeetDataSource: Send + Sync {
    async fn get_meet(&self, id: &str) -> Result<Option<Meet>, StoreError>;

    /// The full event catalog.
    async fn list_events(&self) -> Result<Vec<SwimEvent>, StoreError>;

    async fn get_club(&self, id: &str) -> Result<Option<SwimClub>, StoreError>;

    async fn get_swimmer(&self, id: &str) -> Result<Option<Swimmer>, StoreError>;

    /// Swimmers holding at least one individual selection for the meet, in
    /// roster order.
    async fn list_meet_swimmers(&self, meet_id: &str) -> Result<Vec<Swimmer>, StoreError>;

    /// A swimmer's individual event selections for one meet, in entry order.
    async fn get_swimmer_meet_events(
        &self,
        swimmer_id: &str,
        meet_id: &str,
    ) -> Result<Vec<SwimmerMeetEvent>, StoreError>;

    async fn list_relay_teams(&self, meet_id: &str) -> Result<Vec<RelayTeam>, StoreError>;
}

/// A [`MeetDataSource`] over values held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    meets: HashMap<String, Meet>,
    events: Vec<SwimEvent>,
    clubs: HashMap<String, SwimClub>,
    swimmers: Vec<Swimmer>,
    selections: Vec<SwimmerMeetEvent>,
    relay_teams: Vec<RelayTeam>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meet(mut self, meet: Meet) -> Self {
        self.meets.insert(meet.id.clone(), meet);
        self
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = SwimEvent>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn with_club(mut self, club: SwimClub) -> Self {
        self.clubs.insert(club.id.clone(), club);
        self
    }

    pub fn with_swimmers(mut self, swimmers: impl IntoIterator<Item = Swimmer>) -> Self {
        self.swimmers.extend(swimmers);
        self
    }

    pub fn with_selections(
        mut self,
        selections: impl IntoIterator<Item = SwimmerMeetEvent>,
    ) -> Self {
        self.selections.extend(selections);
        self
    }

    pub fn with_relay_teams(mut self, teams: impl IntoIterator<Item = RelayTeam>) -> Self {
        self.relay_teams.extend(teams);
        self
    }
}

#[async_trait]
impl MeetDataSource for InMemoryStore {
    async fn get_meet(&self, id: &str) -> Result<Option<Meet>, StoreError> {
        Ok(self.meets.get(id).cloned())
    }

    async fn list_events(&self) -> Result<Vec<SwimEvent>, StoreError> {
        Ok(self.events.clone())
    }

    async fn get_club(&self, id: &str) -> Result<Option<SwimClub>, StoreError> {
        Ok(self.clubs.get(id).cloned())
    }

    async fn get_swimmer(&self, id: &str) -> Result<Option<Swimmer>, StoreError> {
        Ok(self.swimmers.iter().find(|s| s.id == id).cloned())
    }

    async fn list_meet_swimmers(&self, meet_id: &str) -> Result<Vec<Swimmer>, StoreError> {
        Ok(self
            .swimmers
            .iter()
            .filter(|s| {
                self.selections
                    .iter()
                    .any(|sel| sel.meet_id == meet_id && sel.swimmer_id == s.id)
            })
            .cloned()
            .collect())
    }

    async fn get_swimmer_meet_events(
        &self,
        swimmer_id: &str,
        meet_id: &str,
    ) -> Result<Vec<SwimmerMeetEvent>, StoreError> {
        Ok(self
            .selections
            .iter()
            .filter(|sel| sel.swimmer_id == swimmer_id && sel.meet_id == meet_id)
            .cloned()
            .collect())
    }

    async fn list_relay_teams(&self, meet_id: &str) -> Result<Vec<RelayTeam>, StoreError> {
        Ok(self
            .relay_teams
            .iter()
            .filter(|team| team.meet_id == meet_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sex;
    use time::macros::date;

    fn swimmer(id: &str) -> Swimmer {
        Swimmer {
            id: id.to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            date_of_birth: date!(2012 - 01 - 01),
            sex: Sex::Female,
        }
    }

    fn selection(swimmer_id: &str, meet_id: &str, event_id: &str) -> SwimmerMeetEvent {
        SwimmerMeetEvent {
            swimmer_id: swimmer_id.to_string(),
            meet_id: meet_id.to_string(),
            event_id: event_id.to_string(),
            seed_time: None,
        }
    }

    #[tokio::test]
    async fn test_meet_swimmers_keep_roster_order() {
        let store = InMemoryStore::new()
            .with_swimmers([swimmer("s3"), swimmer("s1"), swimmer("s2")])
            .with_selections([
                selection("s1", "m1", "e1"),
                selection("s3", "m1", "e1"),
                selection("s2", "m2", "e1"),
            ]);

        let ids: Vec<String> = store
            .list_meet_swimmers("m1")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["s3", "s1"]);
    }

    #[tokio::test]
    async fn test_selections_are_scoped_to_meet() {
        let store = InMemoryStore::new().with_selections([
            selection("s1", "m1", "e1"),
            selection("s1", "m1", "e2"),
            selection("s1", "m2", "e3"),
        ]);
        let events = store.get_swimmer_meet_events("s1", "m1").await.unwrap();
        assert_eq!(events.len(), 2);
        assert!(store.get_swimmer("s1").await.unwrap().is_none());
    }
}
