//! Latent Dirichlet Allocation fitted with variational Bayes.
//!
//! Each pass runs a full E-step over the corpus and blends the result into
//! the topic-word parameters with weight `rho = (offset + updates)^-decay`,
//! where `updates` counts the blends already applied.
//! Initialisation is deterministic so identical input yields identical topics.

use tracing::debug;

use super::dictionary::BagOfWords;
use super::error::TopicError;

/// Fitting parameters. `alpha` and `eta` are symmetric `1 / num_topics`.
#[derive(Debug, Clone)]
pub struct LdaConfig {
    pub num_topics: usize,
    pub passes: usize,
    /// E-step iterations per document.
    pub iterations: usize,
    /// E-step stops once mean |Δgamma| falls below this.
    pub gamma_threshold: f64,
    pub decay: f64,
    pub offset: f64,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            num_topics: crate::constants::TOPIC_COUNT,
            passes: crate::constants::TOPIC_PASSES,
            iterations: 50,
            gamma_threshold: 0.001,
            decay: 0.5,
            offset: 1.0,
        }
    }
}

impl LdaConfig {
    pub fn validate(&self) -> Result<(), TopicError> {
        if self.num_topics == 0 {
            return Err(TopicError::InvalidConfig {
                reason: "num_topics must be at least 1".to_string(),
            });
        }
        if self.passes == 0 {
            return Err(TopicError::InvalidConfig {
                reason: "passes must be at least 1".to_string(),
            });
        }
        if !(0.5..=1.0).contains(&self.decay) {
            return Err(TopicError::InvalidConfig {
                reason: format!("decay must be in [0.5, 1.0], got {}", self.decay),
            });
        }
        Ok(())
    }

    /// Blend weight for the next update after `updates` earlier ones.
    pub fn update_weight(&self, updates: usize) -> f64 {
        (self.offset + updates as f64).powf(-self.decay)
    }
}

/// A fitted topic model.
#[derive(Debug, Clone)]
pub struct LdaModel {
    num_topics: usize,
    num_terms: usize,
    alpha: f64,
    eta: f64,
    /// Variational topic-word parameters, `num_topics x num_terms`.
    lambda: Vec<Vec<f64>>,
}

impl LdaModel {
    pub fn fit(
        corpus: &[BagOfWords],
        num_terms: usize,
        config: &LdaConfig,
    ) -> Result<Self, TopicError> {
        config.validate()?;
        if num_terms == 0 {
            return Err(TopicError::EmptyVocabulary);
        }
        if let Some(&(id, _)) = corpus.iter().flatten().find(|(id, _)| *id >= num_terms) {
            return Err(TopicError::TermOutOfRange { id, num_terms });
        }

        let k = config.num_topics;
        let prior = 1.0 / k as f64;
        let mut model = Self {
            num_topics: k,
            num_terms,
            alpha: prior,
            eta: prior,
            lambda: initial_lambda(k, num_terms),
        };

        for pass in 0..config.passes {
            let sstats = model.e_step(corpus, config);
            let rho = config.update_weight(pass);

            for (row, stats) in model.lambda.iter_mut().zip(&sstats) {
                for (value, stat) in row.iter_mut().zip(stats) {
                    *value = (1.0 - rho) * *value + rho * (model.eta + stat);
                }
            }
        }

        debug!(
            num_topics = k,
            num_terms,
            passes = config.passes,
            docs = corpus.len(),
            "LDA model fitted"
        );

        Ok(model)
    }

    /// Expected sufficient statistics for the topic-word parameters.
    fn e_step(&self, corpus: &[BagOfWords], config: &LdaConfig) -> Vec<Vec<f64>> {
        let k = self.num_topics;
        let exp_elog_beta: Vec<Vec<f64>> = self
            .lambda
            .iter()
            .map(|row| dirichlet_expectation(row).into_iter().map(f64::exp).collect())
            .collect();

        let mut sstats = vec![vec![0.0; self.num_terms]; k];

        for doc in corpus.iter().filter(|doc| !doc.is_empty()) {
            let mut gamma = vec![1.0; k];
            let mut exp_elog_theta: Vec<f64> = exp_dirichlet_expectation(&gamma);
            let mut phinorm = phi_norm(doc, &exp_elog_theta, &exp_elog_beta);

            for _ in 0..config.iterations {
                let last_gamma = gamma.clone();
                for topic in 0..k {
                    let weighted: f64 = doc
                        .iter()
                        .zip(&phinorm)
                        .map(|(&(id, count), norm)| {
                            count as f64 / norm * exp_elog_beta[topic][id]
                        })
                        .sum();
                    gamma[topic] = self.alpha + exp_elog_theta[topic] * weighted;
                }
                exp_elog_theta = exp_dirichlet_expectation(&gamma);
                phinorm = phi_norm(doc, &exp_elog_theta, &exp_elog_beta);

                let mean_change = gamma
                    .iter()
                    .zip(&last_gamma)
                    .map(|(a, b)| (a - b).abs())
                    .sum::<f64>()
                    / k as f64;
                if mean_change < config.gamma_threshold {
                    break;
                }
            }

            for (topic, row) in sstats.iter_mut().enumerate() {
                for (&(id, count), norm) in doc.iter().zip(&phinorm) {
                    row[id] +=
                        exp_elog_theta[topic] * count as f64 / norm * exp_elog_beta[topic][id];
                }
            }
        }

        sstats
    }

    /// Normalised term distribution of `topic`.
    pub fn topic_distribution(&self, topic: usize) -> Option<Vec<f64>> {
        let row = self.lambda.get(topic)?;
        let total: f64 = row.iter().sum();
        Some(row.iter().map(|v| v / total).collect())
    }

    /// The `top_n` heaviest `(term id, probability)` pairs of `topic`,
    /// heaviest first, ties broken by lower id.
    pub fn top_terms(&self, topic: usize, top_n: usize) -> Vec<(usize, f64)> {
        let Some(distribution) = self.topic_distribution(topic) else {
            return Vec::new();
        };

        let mut terms: Vec<(usize, f64)> = distribution.into_iter().enumerate().collect();
        terms.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        terms.truncate(top_n);
        terms
    }
}

fn initial_lambda(num_topics: usize, num_terms: usize) -> Vec<Vec<f64>> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..num_topics)
        .map(|_| {
            (0..num_terms)
                .map(|_| {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                    let unit = (state >> 32) as f64 / u32::MAX as f64;
                    1.0 + 0.01 * (unit - 0.5)
                })
                .collect()
        })
        .collect()
}

fn phi_norm(doc: &BagOfWords, exp_elog_theta: &[f64], exp_elog_beta: &[Vec<f64>]) -> Vec<f64> {
    doc.iter()
        .map(|&(id, _)| {
            exp_elog_theta
                .iter()
                .zip(exp_elog_beta)
                .map(|(theta, beta)| theta * beta[id])
                .sum::<f64>()
                + 1e-100
        })
        .collect()
}

/// `E[log X]` for `X ~ Dirichlet(params)`.
pub fn dirichlet_expectation(params: &[f64]) -> Vec<f64> {
    let total = digamma(params.iter().sum());
    params.iter().map(|&p| digamma(p) - total).collect()
}

fn exp_dirichlet_expectation(params: &[f64]) -> Vec<f64> {
    dirichlet_expectation(params)
        .into_iter()
        .map(f64::exp)
        .collect()
}

/// Digamma function (recurrence up to x >= 6, then asymptotic series).
pub fn digamma(mut x: f64) -> f64 {
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let f = 1.0 / (x * x);
    result + x.ln()
        - 0.5 / x
        - f * (1.0 / 12.0 - f * (1.0 / 120.0 - f * (1.0 / 252.0 - f * (1.0 / 240.0 - f / 132.0))))
}
