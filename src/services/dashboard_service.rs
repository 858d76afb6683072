// src/services/dashboard_service.rs
//
// Display structures derived from a location snapshot. Everything here is a
// pure function over borrowed data.

use uuid::Uuid;

use crate::models::{
    customer::{Customer, DispositionStatus},
    dashboard::{DispositionGroup, InstallerJobs, LeaderboardEntry},
    job::JobRole,
    location::Location,
};

/// Groups customers by disposition: NEW first, then the pipeline order.
/// Groups after NEW follow the declaration order of `DispositionStatus`,
/// not the order their first customer appears in. Unknown statuses count as
/// NEW; customers keep their input order within a group.
pub fn group_by_disposition(customers: &[Customer]) -> Vec<DispositionGroup<'_>> {
    DispositionStatus::ALL
        .into_iter()
        .map(|status| DispositionGroup {
            status,
            label: status.label(),
            customers: customers
                .iter()
                .filter(|c| c.disposition() == status)
                .collect(),
        })
        .filter(|group| !group.customers.is_empty())
        .collect()
}

/// Closed-job count per closer at the location, highest first.
/// Ties keep the location's member order.
pub fn closer_leaderboard(location: &Location) -> Vec<LeaderboardEntry<'_>> {
    let mut entries: Vec<LeaderboardEntry<'_>> = location
        .profiles
        .iter()
        .filter(|member| member.roles.is_closer)
        .map(|member| LeaderboardEntry {
            profile: &member.profile,
            job_count: location
                .jobs
                .iter()
                .filter(|job| job.has_role(member.profile.id, JobRole::Closer))
                .count(),
        })
        .collect();

    // sort_by is stable
    entries.sort_by(|a, b| b.job_count.cmp(&a.job_count));
    entries
}

/// In-progress jobs per installer, installers in first-seen order.
/// A job with several installers is listed under each of them.
pub fn installer_dashboard(location: &Location) -> Vec<InstallerJobs<'_>> {
    let mut groups: Vec<InstallerJobs<'_>> = Vec::new();

    for job in location.jobs.iter().filter(|job| job.is_in_progress()) {
        let mut seen: Vec<Uuid> = Vec::new();
        for installer_id in job.profiles_with_role(JobRole::Installer) {
            if seen.contains(&installer_id) {
                continue;
            }
            seen.push(installer_id);

            match groups.iter_mut().find(|g| g.profile_id == installer_id) {
                Some(group) => group.jobs.push(job),
                None => groups.push(InstallerJobs {
                    profile_id: installer_id,
                    profile: location.member(installer_id).map(|m| &m.profile),
                    jobs: vec![job],
                }),
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        job::{Job, JobProfile},
        location::LocationMember,
        profile::{ProfileSummary, RoleFlags},
    };

    fn member(name: &str, roles: RoleFlags) -> LocationMember {
        LocationMember {
            id: 0,
            roles,
            profile: ProfileSummary {
                id: Uuid::new_v4(),
                full_name: Some(name.to_string()),
                avatar_url: None,
            },
        }
    }

    fn closer(name: &str) -> LocationMember {
        member(name, RoleFlags { is_closer: true, ..Default::default() })
    }

    fn job(id: i64, status: &str, roles: &[(Uuid, JobRole)]) -> Job {
        Job {
            id,
            location_id: 1,
            status: status.to_string(),
            profiles: roles
                .iter()
                .map(|(profile_id, role)| JobProfile { profile_id: *profile_id, role: *role })
                .collect(),
            ..Default::default()
        }
    }

    fn customer(id: i64, status: Option<&str>) -> Customer {
        Customer {
            id,
            disposition_status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn empty_location_builds_empty_views() {
        let location = Location::default();
        assert!(group_by_disposition(&location.customers).is_empty());
        assert!(closer_leaderboard(&location).is_empty());
        assert!(installer_dashboard(&location).is_empty());
    }

    #[test]
    fn closers_without_jobs_still_rank_with_zero() {
        let location = Location {
            profiles: vec![closer("Ana"), member("Ivo", RoleFlags { is_installer: true, ..Default::default() })],
            ..Default::default()
        };
        let board = closer_leaderboard(&location);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].job_count, 0);
    }

    #[test]
    fn disposition_groups_put_new_first_and_absorb_unknowns() {
        let customers = vec![
            customer(1, Some("PITCHED_CLOSED")),
            customer(2, Some("SOMETHING_ELSE")),
            customer(3, Some("SCHEDULED")),
            customer(4, None),
            customer(5, Some("NEW")),
            customer(6, Some("PITCHED_CLOSED")),
        ];

        let groups = group_by_disposition(&customers);
        let shape: Vec<(DispositionStatus, Vec<i64>)> = groups
            .iter()
            .map(|g| (g.status, g.customers.iter().map(|c| c.id).collect()))
            .collect();

        assert_eq!(
            shape,
            vec![
                (DispositionStatus::New, vec![2, 4, 5]),
                (DispositionStatus::Scheduled, vec![3]),
                (DispositionStatus::PitchedClosed, vec![1, 6]),
            ]
        );
        assert_eq!(groups[0].label, "New");
    }

    #[test]
    fn leaderboard_tallies_overlapping_closer_assignments() {
        let (a, b, c) = (closer("A"), closer("B"), closer("C"));
        let (ia, ib, ic) = (a.profile.id, b.profile.id, c.profile.id);
        let installer = Uuid::new_v4();

        let location = Location {
            profiles: vec![a, b, c],
            jobs: vec![
                job(1, "new", &[(ia, JobRole::Closer), (ib, JobRole::Closer)]),
                job(2, "approved", &[(ib, JobRole::Closer)]),
                job(3, "complete", &[(ib, JobRole::Closer), (ic, JobRole::Closer)]),
                job(4, "pending", &[(ic, JobRole::Closer), (ia, JobRole::Installer)]),
                job(5, "new", &[(installer, JobRole::Installer), (ia, JobRole::Setter)]),
            ],
            ..Default::default()
        };

        let board: Vec<(&str, usize)> = closer_leaderboard(&location)
            .iter()
            .map(|e| (e.profile.full_name.as_deref().unwrap(), e.job_count))
            .collect();

        assert_eq!(board, vec![("B", 3), ("C", 2), ("A", 1)]);
    }

    #[test]
    fn leaderboard_ties_keep_member_order() {
        let (a, b, c) = (closer("A"), closer("B"), closer("C"));
        let (ia, ib, ic) = (a.profile.id, b.profile.id, c.profile.id);
        let location = Location {
            profiles: vec![a, b, c],
            jobs: vec![
                job(1, "new", &[(ic, JobRole::Closer)]),
                job(2, "new", &[(ia, JobRole::Closer)]),
                job(3, "new", &[(ib, JobRole::Installer)]),
            ],
            ..Default::default()
        };

        let names: Vec<&str> = closer_leaderboard(&location)
            .iter()
            .map(|e| e.profile.full_name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }

    #[test]
    fn installer_dashboard_filters_statuses_and_repeats_shared_jobs() {
        let i1 = member("Ivo", RoleFlags { is_installer: true, ..Default::default() });
        let (id1, id2) = (i1.profile.id, Uuid::new_v4());

        let location = Location {
            profiles: vec![i1],
            jobs: vec![
                job(1, "scheduled", &[(id1, JobRole::Installer), (id2, JobRole::Installer)]),
                job(2, "complete", &[(id1, JobRole::Installer)]),
                job(3, "pending", &[(id2, JobRole::Installer)]),
                job(4, "approved", &[(id1, JobRole::Closer)]),
                job(5, "new", &[(id1, JobRole::Installer), (id1, JobRole::Installer)]),
            ],
            ..Default::default()
        };

        let dashboard = installer_dashboard(&location);
        assert_eq!(dashboard.len(), 2);

        assert_eq!(dashboard[0].profile_id, id1);
        assert_eq!(dashboard[0].profile.unwrap().full_name.as_deref(), Some("Ivo"));
        assert_eq!(dashboard[0].jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![1, 5]);

        assert_eq!(dashboard[1].profile_id, id2);
        assert!(dashboard[1].profile.is_none());
        assert_eq!(dashboard[1].jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![1, 3]);
    }
}
