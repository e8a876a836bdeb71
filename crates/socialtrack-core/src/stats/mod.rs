//! The progress calculator: a pure function from the month record to the
//! dashboard statistics.
//!
//! Stats are derived on every read and never persisted; callers must not
//! cache them. The function is total over well-formed records -- malformed
//! input is a store-side precondition, not a calculator error.

use serde::Serialize;

use crate::catalog::PlanConfig;
use crate::month::MonthData;

/// Derived completion statistics for the dashboard and report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub posts_completed: u32,
    pub total_posts: u32,
    pub reels_completed: u32,
    pub total_reels: u32,
    pub stories_total: u32,
    pub comments_total: u32,
    /// Weighted completion, always in 0..=100.
    pub progress_percentage: u8,
}

/// Category weights for the completion percentage. Always sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub posts: f64,
    pub reels: f64,
    pub engagement: f64,
}

/// Weights for a plan. Plans without a reel quota shift the reel share
/// onto posts; the engagement share is fixed.
pub fn weights_for(plan: &PlanConfig) -> Weights {
    if plan.total_reels == 0 {
        Weights { posts: 0.8, reels: 0.0, engagement: 0.2 }
    } else {
        Weights { posts: 0.6, reels: 0.2, engagement: 0.2 }
    }
}

/// Compute dashboard statistics for the month.
///
/// With no plan selected every field is zero. Posts are summed over the
/// full slot arrays (not limited to the plan's per-week display cap) and
/// clamped to the monthly quota; reels beyond the quota never count;
/// engagement is all-or-nothing -- any story or comment activity grants
/// the full engagement weight.
pub fn compute_stats(month: &MonthData) -> DashboardStats {
    let Some(plan_id) = month.selected_plan else {
        return DashboardStats::default();
    };
    let plan = plan_id.config();

    let mut posts_completed: u32 = 0;
    let mut stories_total: u32 = 0;
    let mut comments_total: u32 = 0;
    for week in &month.weeks {
        posts_completed += week.posts_done();
        stories_total += week.stories_count;
        comments_total += week.comments_count;
    }
    posts_completed = posts_completed.min(plan.total_posts);

    let reels_completed = month.reels[..plan.total_reels]
        .iter()
        .filter(|r| **r)
        .count() as u32;

    let weights = weights_for(plan);

    let post_contribution = if plan.total_posts > 0 {
        (f64::from(posts_completed) / f64::from(plan.total_posts)) * weights.posts * 100.0
    } else {
        0.0
    };
    let reel_contribution = if plan.total_reels > 0 {
        (f64::from(reels_completed) / plan.total_reels as f64) * weights.reels * 100.0
    } else {
        0.0
    };
    let engagement_contribution = if stories_total > 0 || comments_total > 0 {
        weights.engagement * 100.0
    } else {
        0.0
    };

    let progress_percentage = (post_contribution + reel_contribution + engagement_contribution)
        .min(100.0)
        .round() as u8;

    DashboardStats {
        posts_completed,
        total_posts: plan.total_posts,
        reels_completed,
        total_reels: plan.total_reels as u32,
        stories_total,
        comments_total,
        progress_percentage,
    }
}

/// Per-week activity breakdown, for the dashboard chart and report table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekActivity {
    pub week: u8,
    pub posts_done: u32,
    pub stories: u32,
    pub comments: u32,
}

/// Activity per week, in week order.
pub fn weekly_activity(month: &MonthData) -> Vec<WeekActivity> {
    month
        .weeks
        .iter()
        .map(|w| WeekActivity {
            week: w.id,
            posts_done: w.posts_done(),
            stories: w.stories_count,
            comments: w.comments_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlanId;

    fn month_on(plan: PlanId) -> MonthData {
        let mut m = MonthData::pristine_named("Test Month".into());
        m.selected_plan = Some(plan);
        m
    }

    #[test]
    fn no_plan_yields_all_zero_stats() {
        let m = MonthData::pristine_named("Test Month".into());
        assert_eq!(compute_stats(&m), DashboardStats::default());
    }

    #[test]
    fn weights_always_sum_to_one() {
        for id in PlanId::ALL {
            let w = weights_for(id.config());
            assert!((w.posts + w.reels + w.engagement - 1.0).abs() < f64::EPSILON);
            if id.config().total_reels == 0 {
                assert_eq!((w.posts, w.reels), (0.8, 0.0));
            } else {
                assert_eq!((w.posts, w.reels), (0.6, 0.2));
            }
        }
    }

    #[test]
    fn posts_are_clamped_to_the_monthly_quota() {
        // Basic has a quota of 8; mark all 16 stored slots.
        let mut m = month_on(PlanId::Basic);
        for week in &mut m.weeks {
            week.posts = [true; 4];
        }
        let stats = compute_stats(&m);
        assert_eq!(stats.posts_completed, 8);
    }

    #[test]
    fn reels_beyond_the_quota_never_count() {
        // Growth has a reel quota of 2; mark all 4 slots.
        let mut m = month_on(PlanId::Growth);
        m.reels = [true; 4];
        assert_eq!(compute_stats(&m).reels_completed, 2);

        // Basic has no reel quota at all.
        let mut m = month_on(PlanId::Basic);
        m.reels = [true; 4];
        let stats = compute_stats(&m);
        assert_eq!(stats.reels_completed, 0);
        assert_eq!(stats.total_reels, 0);
    }

    #[test]
    fn engagement_is_all_or_nothing() {
        let mut low = month_on(PlanId::Basic);
        low.weeks[0].stories_count = 1;

        let mut high = month_on(PlanId::Basic);
        high.weeks[0].stories_count = 500;
        high.weeks[1].comments_count = 500;

        // Same engagement contribution: both get the full 20 points.
        assert_eq!(compute_stats(&low).progress_percentage, 20);
        assert_eq!(compute_stats(&high).progress_percentage, 20);
    }

    #[test]
    fn basic_scenario_half_posts_no_engagement() {
        // 4 of 8 post slots true, no stories or comments: (4/8)*80 = 40.
        let mut m = month_on(PlanId::Basic);
        m.weeks[0].posts[0] = true;
        m.weeks[0].posts[1] = true;
        m.weeks[1].posts[0] = true;
        m.weeks[1].posts[1] = true;
        let stats = compute_stats(&m);
        assert_eq!(stats.posts_completed, 4);
        assert_eq!(stats.progress_percentage, 40);
    }

    #[test]
    fn growth_scenario_everything_done_is_100() {
        // All 12 posts, both reels, some stories: 60 + 20 + 20 = 100.
        let mut m = month_on(PlanId::Growth);
        for week in &mut m.weeks {
            week.posts = [true, true, true, false];
        }
        m.reels = [true, true, false, false];
        m.weeks[2].stories_count = 3;
        let stats = compute_stats(&m);
        assert_eq!(stats.posts_completed, 12);
        assert_eq!(stats.reels_completed, 2);
        assert_eq!(stats.progress_percentage, 100);
    }

    #[test]
    fn authority_scenario_partial_reels() {
        // 15/15 posts, 3 of 4 reels: reel share is (3/4)*20 = 15.
        let mut m = month_on(PlanId::Authority);
        for week in &mut m.weeks {
            week.posts = [true; 4];
        }
        m.reels = [true, true, true, false];
        let stats = compute_stats(&m);
        assert_eq!(stats.posts_completed, 15);
        assert_eq!(stats.reels_completed, 3);
        // 60 (posts) + 15 (reels) + 0 (no engagement) = 75.
        assert_eq!(stats.progress_percentage, 75);
    }

    #[test]
    fn percentage_never_exceeds_100() {
        let mut m = month_on(PlanId::Authority);
        for week in &mut m.weeks {
            week.posts = [true; 4];
            week.stories_count = 1000;
            week.comments_count = 1000;
        }
        m.reels = [true; 4];
        let stats = compute_stats(&m);
        assert_eq!(stats.progress_percentage, 100);
    }

    #[test]
    fn all_false_checklists_score_zero() {
        for id in PlanId::ALL {
            let m = month_on(id);
            assert_eq!(compute_stats(&m).progress_percentage, 0);
        }
    }

    #[test]
    fn contributions_compose_additively() {
        // Growth: 1 of 12 posts = 5, 1 of 2 reels = 10 -> 15.
        let mut m = month_on(PlanId::Growth);
        m.weeks[0].posts[0] = true;
        m.reels[0] = true;
        assert_eq!(compute_stats(&m).progress_percentage, 15);

        // Authority: 1 of 15 posts = 4, 1 of 4 reels = 5 -> 9.
        let mut m = month_on(PlanId::Authority);
        m.weeks[0].posts[0] = true;
        m.reels[0] = true;
        assert_eq!(compute_stats(&m).progress_percentage, 9);

        // Basic: 1 of 8 posts = 10 plus engagement 20 -> 30.
        let mut m = month_on(PlanId::Basic);
        m.weeks[0].posts[0] = true;
        m.weeks[0].stories_count = 1;
        assert_eq!(compute_stats(&m).progress_percentage, 30);
    }

    #[test]
    fn weekly_activity_breakdown_is_in_week_order() {
        let mut m = month_on(PlanId::Growth);
        m.weeks[0].posts = [true, true, false, false];
        m.weeks[3].stories_count = 4;
        let weekly = weekly_activity(&m);
        assert_eq!(weekly.len(), 4);
        assert_eq!(weekly[0].week, 1);
        assert_eq!(weekly[0].posts_done, 2);
        assert_eq!(weekly[3].stories, 4);
    }
}
