//! Test utilities
//!
//! An in-memory `ContestStore` with failure injection, so the pipeline can be
//! exercised without a database.

pub mod memory_store {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use uuid::Uuid;

    use crate::{
        constants::REST_ACTIVITY_TYPE,
        error::{AppError, AppResult},
        models::{CompletedActivity, Contest, ContestEntry, ContestPhase},
        scoring::store::{ContestStore, EntryScores},
    };

    struct Activity {
        id: Uuid,
        week_id: Uuid,
        activity_type: &'static str,
    }

    struct Log {
        user_id: Uuid,
        activity_id: Uuid,
        completed: bool,
        has_photo: bool,
    }

    #[derive(Default)]
    struct Inner {
        contests: Vec<Contest>,
        entries: Vec<ContestEntry>,
        profiles: HashMap<Uuid, Option<Uuid>>,
        weeks: Vec<(Uuid, Uuid)>,
        activities: Vec<Activity>,
        logs: Vec<Log>,
        failing_users: HashSet<Uuid>,
        failing_rank_writes: HashSet<Uuid>,
        failing_phase_updates: HashSet<Uuid>,
        enrolled: i64,
    }

    /// Mutex-guarded tables mirroring the Postgres schema
    pub struct MemoryStore {
        inner: Mutex<Inner>,
        epoch: DateTime<Utc>,
    }

    fn simulated(what: &str) -> AppError {
        AppError::Database(format!("simulated failure: {what}"))
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self {
                inner: Mutex::new(Inner::default()),
                epoch: Utc::now() - Duration::days(60),
            }
        }

        /// An active accumulation contest that ended yesterday
        pub fn sample_contest(id: Uuid) -> Contest {
            let now = Utc::now();
            Contest {
                id,
                code: format!("C-{}", &id.simple().to_string()[..6]),
                name: "Spring marathon challenge".to_string(),
                description: None,
                terms: Some("Be kind.".to_string()),
                start_date: now - Duration::days(30),
                end_date: now - Duration::days(1),
                max_winners: 3,
                preselection_count: None,
                current_phase: ContestPhase::Accumulation,
                is_active: true,
                created_at: now - Duration::days(31),
            }
        }

        pub fn sample_entry(contest_id: Uuid, user_id: Uuid, created_at: DateTime<Utc>) -> ContestEntry {
            ContestEntry {
                id: Uuid::new_v4(),
                contest_id,
                user_id,
                terms_accepted: false,
                terms_accepted_at: None,
                video_url: None,
                video_uploaded_at: None,
                completion_percent: 0.0,
                photo_percent: 0.0,
                score: 0.0,
                rank: None,
                is_preselected: false,
                preselected_at: None,
                committee_selected: false,
                final_winner: false,
                created_at,
            }
        }

        pub fn add_contest(&self, customize: impl FnOnce(&mut Contest)) -> Uuid {
            let mut contest = Self::sample_contest(Uuid::new_v4());
            customize(&mut contest);
            let id = contest.id;
            self.inner.lock().unwrap().contests.push(contest);
            id
        }

        /// Create a plan with one week per element, each holding that many
        /// non-rest activities.
        pub fn add_plan(&self, activities_per_week: &[usize]) -> Uuid {
            let plan_id = Uuid::new_v4();
            let mut inner = self.inner.lock().unwrap();
            for &count in activities_per_week {
                let week_id = Uuid::new_v4();
                inner.weeks.push((week_id, plan_id));
                for _ in 0..count {
                    inner.activities.push(Activity {
                        id: Uuid::new_v4(),
                        week_id,
                        activity_type: "run",
                    });
                }
            }
            plan_id
        }

        /// Add a rest day to the first week of the plan
        pub fn add_rest_activity(&self, plan_id: Uuid) -> Uuid {
            let mut inner = self.inner.lock().unwrap();
            let week_id = inner
                .weeks
                .iter()
                .find(|(_, p)| *p == plan_id)
                .map(|(w, _)| *w)
                .expect("plan has no weeks");
            let id = Uuid::new_v4();
            inner.activities.push(Activity {
                id,
                week_id,
                activity_type: REST_ACTIVITY_TYPE,
            });
            id
        }

        fn plan_activity_ids(inner: &Inner, plan_id: Uuid) -> Vec<Uuid> {
            let weeks: HashSet<Uuid> = inner
                .weeks
                .iter()
                .filter(|(_, p)| *p == plan_id)
                .map(|(w, _)| *w)
                .collect();
            inner
                .activities
                .iter()
                .filter(|a| weeks.contains(&a.week_id) && a.activity_type != REST_ACTIVITY_TYPE)
                .map(|a| a.id)
                .collect()
        }

        pub fn add_user(&self, plan_id: Option<Uuid>) -> Uuid {
            let user_id = Uuid::new_v4();
            self.inner.lock().unwrap().profiles.insert(user_id, plan_id);
            user_id
        }

        pub fn set_plan(&self, user_id: Uuid, plan_id: Option<Uuid>) {
            self.inner.lock().unwrap().profiles.insert(user_id, plan_id);
        }

        /// Log the first `completed` scorable activities of the plan as done,
        /// the first `with_photo` of them with a photo.
        pub fn complete_activities(&self, user_id: Uuid, plan_id: Uuid, completed: usize, with_photo: usize) {
            let mut inner = self.inner.lock().unwrap();
            let ids = Self::plan_activity_ids(&inner, plan_id);
            assert!(completed <= ids.len(), "plan has only {} activities", ids.len());
            for (i, activity_id) in ids.into_iter().take(completed).enumerate() {
                inner.logs.push(Log {
                    user_id,
                    activity_id,
                    completed: true,
                    has_photo: i < with_photo,
                });
            }
        }

        pub fn log_activity(&self, user_id: Uuid, activity_id: Uuid, completed: bool, has_photo: bool) {
            self.inner.lock().unwrap().logs.push(Log {
                user_id,
                activity_id,
                completed,
                has_photo,
            });
        }

        /// Enroll with a creation time strictly after every earlier entry
        pub fn add_entry(&self, contest_id: Uuid, user_id: Uuid) -> Uuid {
            let mut inner = self.inner.lock().unwrap();
            inner.enrolled += 1;
            let created_at = self.epoch + Duration::seconds(inner.enrolled);
            let entry = Self::sample_entry(contest_id, user_id, created_at);
            let id = entry.id;
            inner.entries.push(entry);
            id
        }

        pub fn set_scores(&self, entry_id: Uuid, completion_percent: f64, photo_percent: f64) {
            let mut inner = self.inner.lock().unwrap();
            let entry = Self::entry_mut(&mut inner, entry_id).expect("unknown entry");
            entry.completion_percent = completion_percent;
            entry.photo_percent = photo_percent;
            entry.score = (completion_percent + photo_percent) / 2.0;
        }

        pub fn mark_entry_preselected(&self, entry_id: Uuid, at: DateTime<Utc>) {
            let mut inner = self.inner.lock().unwrap();
            let entry = Self::entry_mut(&mut inner, entry_id).expect("unknown entry");
            entry.is_preselected = true;
            entry.preselected_at = Some(at);
        }

        pub fn fail_progress_for(&self, user_id: Uuid) {
            self.inner.lock().unwrap().failing_users.insert(user_id);
        }

        pub fn fail_rank_write_for(&self, entry_id: Uuid) {
            self.inner.lock().unwrap().failing_rank_writes.insert(entry_id);
        }

        pub fn restore_rank_write_for(&self, entry_id: Uuid) {
            self.inner.lock().unwrap().failing_rank_writes.remove(&entry_id);
        }

        pub fn fail_phase_update_for(&self, contest_id: Uuid) {
            self.inner.lock().unwrap().failing_phase_updates.insert(contest_id);
        }

        pub fn contest(&self, contest_id: Uuid) -> Contest {
            self.inner
                .lock()
                .unwrap()
                .contests
                .iter()
                .find(|c| c.id == contest_id)
                .cloned()
                .expect("unknown contest")
        }

        pub fn entry(&self, entry_id: Uuid) -> ContestEntry {
            self.inner
                .lock()
                .unwrap()
                .entries
                .iter()
                .find(|e| e.id == entry_id)
                .cloned()
                .expect("unknown entry")
        }

        pub fn entries(&self, contest_id: Uuid) -> Vec<ContestEntry> {
            self.inner
                .lock()
                .unwrap()
                .entries
                .iter()
                .filter(|e| e.contest_id == contest_id)
                .cloned()
                .collect()
        }

        fn entry_mut(inner: &mut Inner, entry_id: Uuid) -> Option<&mut ContestEntry> {
            inner.entries.iter_mut().find(|e| e.id == entry_id)
        }
    }

    #[async_trait]
    impl ContestStore for MemoryStore {
        async fn find_contest(&self, contest_id: Uuid) -> AppResult<Option<Contest>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.contests.iter().find(|c| c.id == contest_id).cloned())
        }

        async fn list_contests_due_for_preselection(
            &self,
            now: DateTime<Utc>,
            only: Option<Uuid>,
        ) -> AppResult<Vec<Contest>> {
            let inner = self.inner.lock().unwrap();
            let mut due: Vec<Contest> = inner
                .contests
                .iter()
                .filter(|c| c.is_due_for_preselection(now))
                .filter(|c| only.is_none_or(|id| id == c.id))
                .cloned()
                .collect();
            due.sort_by_key(|c| c.end_date);
            Ok(due)
        }

        async fn update_contest_phase(&self, contest_id: Uuid, phase: ContestPhase) -> AppResult<()> {
            let mut inner = self.inner.lock().unwrap();
            if inner.failing_phase_updates.contains(&contest_id) {
                return Err(simulated("contest phase update"));
            }
            let contest = inner
                .contests
                .iter_mut()
                .find(|c| c.id == contest_id)
                .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;
            if contest.current_phase.can_advance_to(phase) {
                contest.current_phase = phase;
            }
            Ok(())
        }

        async fn find_entry(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<Option<ContestEntry>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .entries
                .iter()
                .find(|e| e.contest_id == contest_id && e.user_id == user_id)
                .cloned())
        }

        async fn list_entries(&self, contest_id: Uuid) -> AppResult<Vec<ContestEntry>> {
            let inner = self.inner.lock().unwrap();
            let mut entries: Vec<ContestEntry> = inner
                .entries
                .iter()
                .filter(|e| e.contest_id == contest_id)
                .cloned()
                .collect();
            entries.sort_by_key(|e| e.created_at);
            Ok(entries)
        }

        async fn upsert_entry_terms(
            &self,
            contest_id: Uuid,
            user_id: Uuid,
            accepted_at: DateTime<Utc>,
        ) -> AppResult<ContestEntry> {
            let mut inner = self.inner.lock().unwrap();
            if let Some(entry) = inner
                .entries
                .iter_mut()
                .find(|e| e.contest_id == contest_id && e.user_id == user_id)
            {
                entry.terms_accepted = true;
                entry.terms_accepted_at = Some(accepted_at);
                return Ok(entry.clone());
            }

            let mut entry = Self::sample_entry(contest_id, user_id, accepted_at);
            entry.terms_accepted = true;
            entry.terms_accepted_at = Some(accepted_at);
            inner.entries.push(entry.clone());
            Ok(entry)
        }

        async fn update_entry_scores(&self, entry_id: Uuid, scores: EntryScores) -> AppResult<()> {
            let mut inner = self.inner.lock().unwrap();
            let entry = Self::entry_mut(&mut inner, entry_id)
                .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;
            entry.completion_percent = scores.completion_percent;
            entry.photo_percent = scores.photo_percent;
            entry.score = scores.score;
            Ok(())
        }

        async fn update_entry_rank(&self, entry_id: Uuid, rank: i32) -> AppResult<()> {
            let mut inner = self.inner.lock().unwrap();
            if inner.failing_rank_writes.contains(&entry_id) {
                return Err(simulated("rank write"));
            }
            let entry = Self::entry_mut(&mut inner, entry_id)
                .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;
            entry.rank = Some(rank);
            Ok(())
        }

        async fn update_entry_video(
            &self,
            entry_id: Uuid,
            video_url: &str,
            uploaded_at: DateTime<Utc>,
        ) -> AppResult<()> {
            let mut inner = self.inner.lock().unwrap();
            let entry = Self::entry_mut(&mut inner, entry_id)
                .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;
            entry.video_url = Some(video_url.to_string());
            entry.video_uploaded_at = Some(uploaded_at);
            Ok(())
        }

        async fn reset_preselection(&self, contest_id: Uuid) -> AppResult<()> {
            let mut inner = self.inner.lock().unwrap();
            for entry in inner.entries.iter_mut().filter(|e| e.contest_id == contest_id) {
                entry.is_preselected = false;
                entry.preselected_at = None;
                entry.rank = None;
            }
            Ok(())
        }

        async fn mark_preselected(
            &self,
            contest_id: Uuid,
            max_rank: i32,
            at: DateTime<Utc>,
        ) -> AppResult<u64> {
            let mut inner = self.inner.lock().unwrap();
            let mut marked = 0;
            for entry in inner
                .entries
                .iter_mut()
                .filter(|e| e.contest_id == contest_id && e.rank.is_some_and(|r| r <= max_rank))
            {
                entry.is_preselected = true;
                entry.preselected_at = Some(at);
                marked += 1;
            }
            Ok(marked)
        }

        async fn current_plan_id(&self, user_id: Uuid) -> AppResult<Option<Uuid>> {
            let inner = self.inner.lock().unwrap();
            if inner.failing_users.contains(&user_id) {
                return Err(simulated("profile lookup"));
            }
            Ok(inner.profiles.get(&user_id).copied().flatten())
        }

        async fn list_plan_week_ids(&self, plan_id: Uuid) -> AppResult<Vec<Uuid>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .weeks
                .iter()
                .filter(|(_, p)| *p == plan_id)
                .map(|(w, _)| *w)
                .collect())
        }

        async fn list_scorable_activity_ids(&self, week_ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .activities
                .iter()
                .filter(|a| week_ids.contains(&a.week_id) && a.activity_type != REST_ACTIVITY_TYPE)
                .map(|a| a.id)
                .collect())
        }

        async fn list_completed_activities(
            &self,
            user_id: Uuid,
            activity_ids: &[Uuid],
        ) -> AppResult<Vec<CompletedActivity>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .logs
                .iter()
                .filter(|l| l.user_id == user_id && l.completed && activity_ids.contains(&l.activity_id))
                .map(|l| CompletedActivity {
                    activity_id: l.activity_id,
                    has_photo: l.has_photo,
                })
                .collect())
        }
    }
}
