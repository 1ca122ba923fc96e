//! Fixed badge registry and unlock predicates.

use learn_domain::{BadgeTier, LearningProgress, StreakInfo, SubjectProgress};

/// Everything a badge predicate may inspect.
#[derive(Debug, Clone, Copy)]
pub struct BadgeContext<'a> {
    pub progress: &'a LearningProgress,
    pub streak: &'a StreakInfo,
    pub total_xp: u64,
}

/// One badge definition. Predicates are pure over the [`BadgeContext`].
pub struct BadgeSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub tier: BadgeTier,
    pub predicate: fn(&BadgeContext<'_>) -> bool,
}

/// The full registry, in evaluation order.
#[must_use]
pub fn badge_registry() -> &'static [BadgeSpec] {
    REGISTRY
}

const REGISTRY: &[BadgeSpec] = &[
    BadgeSpec {
        key: "streak_3",
        title: "Warming Up",
        description: "Study three days in a row",
        icon: "flame",
        tier: BadgeTier::Bronze,
        predicate: streak_3,
    },
    BadgeSpec {
        key: "streak_7",
        title: "One Full Week",
        description: "Study seven days in a row",
        icon: "flame",
        tier: BadgeTier::Silver,
        predicate: streak_7,
    },
    BadgeSpec {
        key: "streak_30",
        title: "Monthly Habit",
        description: "Study thirty days in a row",
        icon: "flame",
        tier: BadgeTier::Gold,
        predicate: streak_30,
    },
    BadgeSpec {
        key: "streak_100",
        title: "Unstoppable",
        description: "Study one hundred days in a row",
        icon: "flame",
        tier: BadgeTier::Platinum,
        predicate: streak_100,
    },
    BadgeSpec {
        key: "reviews_100",
        title: "Century",
        description: "Complete 100 reviews",
        icon: "stack",
        tier: BadgeTier::Bronze,
        predicate: reviews_100,
    },
    BadgeSpec {
        key: "reviews_1000",
        title: "Thousand Club",
        description: "Complete 1,000 reviews",
        icon: "stack",
        tier: BadgeTier::Silver,
        predicate: reviews_1000,
    },
    BadgeSpec {
        key: "reviews_10000",
        title: "Ten Thousand Strong",
        description: "Complete 10,000 reviews",
        icon: "stack",
        tier: BadgeTier::Gold,
        predicate: reviews_10000,
    },
    BadgeSpec {
        key: "accuracy_90",
        title: "Sharp Mind",
        description: "Hold 90% accuracy across 50+ reviews",
        icon: "target",
        tier: BadgeTier::Gold,
        predicate: accuracy_90,
    },
    BadgeSpec {
        key: "accuracy_95",
        title: "Laser Focus",
        description: "Hold 95% accuracy across 100+ reviews",
        icon: "target",
        tier: BadgeTier::Platinum,
        predicate: accuracy_95,
    },
    BadgeSpec {
        key: "xp_1000",
        title: "Rising Scholar",
        description: "Earn 1,000 XP",
        icon: "star",
        tier: BadgeTier::Bronze,
        predicate: xp_1000,
    },
    BadgeSpec {
        key: "xp_10000",
        title: "Dedicated Scholar",
        description: "Earn 10,000 XP",
        icon: "star",
        tier: BadgeTier::Gold,
        predicate: xp_10000,
    },
    BadgeSpec {
        key: "xp_100000",
        title: "Grand Scholar",
        description: "Earn 100,000 XP",
        icon: "star",
        tier: BadgeTier::Diamond,
        predicate: xp_100000,
    },
    BadgeSpec {
        key: "first_mastery",
        title: "First Summit",
        description: "Fully master a subject",
        icon: "trophy",
        tier: BadgeTier::Gold,
        predicate: first_mastery,
    },
    BadgeSpec {
        key: "mastery_3",
        title: "Polymath",
        description: "Fully master three subjects",
        icon: "trophy",
        tier: BadgeTier::Platinum,
        predicate: mastery_3,
    },
];

fn streak_3(ctx: &BadgeContext<'_>) -> bool {
    ctx.streak.current >= 3
}

fn streak_7(ctx: &BadgeContext<'_>) -> bool {
    ctx.streak.current >= 7
}

fn streak_30(ctx: &BadgeContext<'_>) -> bool {
    ctx.streak.current >= 30
}

fn streak_100(ctx: &BadgeContext<'_>) -> bool {
    ctx.streak.current >= 100
}

fn reviews_100(ctx: &BadgeContext<'_>) -> bool {
    ctx.progress.total_reviews >= 100
}

fn reviews_1000(ctx: &BadgeContext<'_>) -> bool {
    ctx.progress.total_reviews >= 1_000
}

fn reviews_10000(ctx: &BadgeContext<'_>) -> bool {
    ctx.progress.total_reviews >= 10_000
}

fn accuracy_90(ctx: &BadgeContext<'_>) -> bool {
    ctx.progress.total_reviews >= 50 && ctx.progress.overall_accuracy() >= 0.90
}

fn accuracy_95(ctx: &BadgeContext<'_>) -> bool {
    ctx.progress.total_reviews >= 100 && ctx.progress.overall_accuracy() >= 0.95
}

fn xp_1000(ctx: &BadgeContext<'_>) -> bool {
    ctx.total_xp >= 1_000
}

fn xp_10000(ctx: &BadgeContext<'_>) -> bool {
    ctx.total_xp >= 10_000
}

fn xp_100000(ctx: &BadgeContext<'_>) -> bool {
    ctx.total_xp >= 100_000
}

fn is_fully_mastered(subject: &SubjectProgress) -> bool {
    subject.total_cards > 0 && subject.mastered_cards >= subject.total_cards
}

fn mastered_subject_count(progress: &LearningProgress) -> usize {
    progress
        .subjects
        .values()
        .filter(|subject| is_fully_mastered(subject))
        .count()
}

fn first_mastery(ctx: &BadgeContext<'_>) -> bool {
    mastered_subject_count(ctx.progress) >= 1
}

fn mastery_3(ctx: &BadgeContext<'_>) -> bool {
    mastered_subject_count(ctx.progress) >= 3
}
