//! Sample discussions shown on the landing page before sign-up. Static content;
//! real threads require an account.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Post {
    pub id: u32,
    pub title: &'static str,
    pub summary: &'static str,
    pub field: &'static str,
    pub votes: u32,
    pub replies: u32,
}

pub const SAMPLE_POSTS: [Post; 3] = [
    Post {
        id: 1,
        title: "How can we model inflation expectations in emerging markets?",
        summary: "Looking for papers or models that connect survey-based expectations with market-implied measures.",
        field: "Economics / Finance",
        votes: 27,
        replies: 9,
    },
    Post {
        id: 2,
        title: "Best resources to start with measure-theoretic probability?",
        summary: "I finished a standard probability course and want to prepare for graduate-level stochastic processes.",
        field: "Mathematics",
        votes: 34,
        replies: 12,
    },
    Post {
        id: 3,
        title: "Datasets for studying the impact of air pollution on cardiovascular health?",
        summary: "Preferably open-source datasets that connect air quality indices with hospital admissions.",
        field: "Environmental Science",
        votes: 19,
        replies: 6,
    },
];
