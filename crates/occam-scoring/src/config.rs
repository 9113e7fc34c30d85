//! Serializable scorer configuration.
//!
//! A [`ScoringConfig`] names one scorer with its parameters and the complexity
//! penalty to apply, and builds a ready-to-use [`BoxedScorer`] for a table:
//!
//! ```
//! use std::sync::Arc;
//!
//! use occam_scoring::{config::ScoringConfig, program::Literal, scorer::BehavioralScorer as _};
//! use occam_table::{CompressedTable, OutputType, Value};
//!
//! let config: ScoringConfig = serde_json::from_str(
//!     r#"{
//!         "scorer": { "kind": "truth_table" },
//!         "occam": { "kind": "ratio", "ratio": 4.0 }
//!     }"#,
//! )
//! .unwrap();
//!
//! let samples = [(vec![Value::TRUE], Value::TRUE), (vec![Value::FALSE], Value::FALSE)];
//! let table = CompressedTable::from_samples(OutputType::Boolean, 1, samples).unwrap();
//! let scorer = config.build(Arc::new(table)).unwrap();
//!
//! let score = scorer.score(&Literal::new(0, Value::TRUE));
//! assert_eq!(score.behavior, vec![0.0, 0.0]);
//! assert_eq!(score.penalty, -0.25);
//! ```

use std::sync::Arc;

use occam_table::CompressedTable;
use serde::{Deserialize, Serialize};

use crate::{
    discretize::ClassThresholds,
    error::ScorerError,
    penalty::{ComplexityNormalization, ThresholdBand},
    program::EnumProgram,
    scorer::{
        BehavioralScorer, BoxedScorer, ConfigureOccam, ContinScorer, DiscretizedContinScorer,
        DiscriminatingScorer, EnumEffectiveScorer, EnumFilterScorer, EnumGradedScorer,
        EnumTableScorer, ErrorFunction, InterestingnessConfig, InterestingnessScorer,
        LogicalScorer, PrecisionScorer, TruthTableScorer,
    },
};

fn default_true() -> bool {
    true
}

/// Complexity penalty settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OccamConfig {
    /// Coefficient derived from the alphabet size and the data noise.
    Noise { alphabet_size: u32, noise: f64 },
    /// Coefficient `1 / ratio`.
    Ratio { ratio: f64 },
}

impl OccamConfig {
    pub fn apply<S>(self, scorer: &mut S)
    where
        S: ConfigureOccam + ?Sized,
    {
        match self {
            Self::Noise {
                alphabet_size,
                noise,
            } => scorer.set_complexity_coef(alphabet_size, noise),
            Self::Ratio { ratio } => scorer.set_complexity_ratio(ratio),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorerConfig {
    Logical {
        arity: usize,
        target: Vec<bool>,
    },
    Contin {
        #[serde(default)]
        error: ErrorFunction,
    },
    DiscretizedContin {
        thresholds: Vec<f64>,
        #[serde(default)]
        weighted: bool,
    },
    TruthTable,
    EnumTable,
    /// Maximize recall with precision kept in the band.
    Recall {
        precision: ThresholdBand,
    },
    /// Maximize precision with recall kept in the band.
    Prerec {
        recall: ThresholdBand,
    },
    Precision {
        activation: ThresholdBand,
        #[serde(default = "default_true")]
        positive: bool,
        #[serde(default)]
        worst_norm: bool,
    },
    Interestingness(InterestingnessConfig),
}

/// A scorer for plain candidates, with its complexity penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub scorer: ScorerConfig,
    #[serde(default)]
    pub occam: Option<OccamConfig>,
    /// Used by the precision and discriminating scorers only.
    #[serde(default)]
    pub normalization: ComplexityNormalization,
}

impl ScoringConfig {
    /// Builds the configured scorer for `table`.
    ///
    /// The logical scorer carries its own truth table and ignores `table`.
    pub fn build(&self, table: Arc<CompressedTable>) -> Result<BoxedScorer, ScorerError> {
        tracing::info!(scorer = ?self.scorer, occam = ?self.occam, "building scorer");
        let normalization = self.normalization;
        let scorer = match &self.scorer {
            ScorerConfig::Logical { arity, target } => {
                self.finish(LogicalScorer::new(*arity, target.clone())?)
            }
            ScorerConfig::Contin { error } => self.finish(ContinScorer::new(table, *error)?),
            ScorerConfig::DiscretizedContin {
                thresholds,
                weighted,
            } => {
                let thresholds = ClassThresholds::new(thresholds.clone())?;
                self.finish(DiscretizedContinScorer::new(table, thresholds, *weighted)?)
            }
            ScorerConfig::TruthTable => self.finish(TruthTableScorer::new(table)?),
            ScorerConfig::EnumTable => self.finish(EnumTableScorer::new(table)?),
            ScorerConfig::Recall { precision } => self.finish(
                DiscriminatingScorer::recall(table, *precision)?.with_normalization(normalization),
            ),
            ScorerConfig::Prerec { recall } => self.finish(
                DiscriminatingScorer::prerec(table, *recall)?.with_normalization(normalization),
            ),
            ScorerConfig::Precision {
                activation,
                positive,
                worst_norm,
            } => self.finish(
                PrecisionScorer::new(table, *activation, *positive, *worst_norm)?
                    .with_normalization(normalization),
            ),
            ScorerConfig::Interestingness(config) => {
                self.finish(InterestingnessScorer::new(table, *config)?)
            }
        };
        Ok(scorer)
    }

    fn finish<S>(&self, mut scorer: S) -> BoxedScorer
    where
        S: BehavioralScorer + ConfigureOccam + 'static,
    {
        if let Some(occam) = self.occam {
            occam.apply(&mut scorer);
        }
        Box::new(scorer)
    }
}

/// Scorers for decision-list candidates over enum tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionListScorerConfig {
    EnumTable,
    Filter { punish: f64 },
    Graded { grading: f64 },
    Effective { grading: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionListScoringConfig {
    pub scorer: DecisionListScorerConfig,
    #[serde(default)]
    pub occam: Option<OccamConfig>,
}

impl DecisionListScoringConfig {
    pub fn build(
        &self,
        table: Arc<CompressedTable>,
    ) -> Result<BoxedScorer<EnumProgram>, ScorerError> {
        tracing::info!(scorer = ?self.scorer, occam = ?self.occam, "building decision list scorer");
        let scorer = match self.scorer {
            DecisionListScorerConfig::EnumTable => self.finish(EnumTableScorer::new(table)?),
            DecisionListScorerConfig::Filter { punish } => {
                self.finish(EnumFilterScorer::new(table, punish)?)
            }
            DecisionListScorerConfig::Graded { grading } => {
                self.finish(EnumGradedScorer::new(table, grading)?)
            }
            DecisionListScorerConfig::Effective { grading } => {
                self.finish(EnumEffectiveScorer::new(table, grading)?)
            }
        };
        Ok(scorer)
    }

    fn finish<S>(&self, mut scorer: S) -> BoxedScorer<EnumProgram>
    where
        S: BehavioralScorer<EnumProgram> + ConfigureOccam + 'static,
    {
        if let Some(occam) = self.occam {
            occam.apply(&mut scorer);
        }
        Box::new(scorer)
    }
}

#[cfg(test)]
mod tests {
    use occam_table::{OutputType, Value};

    use super::*;
    use crate::{
        program::{BoxedProgram, Clause, DecisionList, Literal},
        scorer::testing::nand_table,
    };

    fn parse(json: &str) -> ScoringConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_precision_with_ratio_occam() {
        let config = parse(
            r#"{
                "scorer": {
                    "kind": "precision",
                    "activation": { "min": 0.2, "max": 0.8, "weight": 1.0 }
                },
                "occam": { "kind": "ratio", "ratio": 2.0 }
            }"#,
        );
        assert_eq!(
            config.scorer,
            ScorerConfig::Precision {
                activation: ThresholdBand::new(0.2, 0.8, 1.0).unwrap(),
                positive: true,
                worst_norm: false,
            }
        );
        assert_eq!(config.normalization, ComplexityNormalization::TableSize);

        let scorer = config.build(Arc::new(nand_table())).unwrap();
        // !$0 fires on the two true rows 00 and 01
        let score = scorer.score(&Literal::new(0, Value::FALSE));
        assert_eq!(score.behavior, vec![1.0, 0.0]);
        // 1 / (2 * 4) per literal
        assert_eq!(score.penalty, -0.125);
    }

    #[test]
    fn test_truth_table_with_noise_occam() {
        let config = parse(
            r#"{
                "scorer": { "kind": "truth_table" },
                "occam": { "kind": "noise", "alphabet_size": 3, "noise": 0.1 }
            }"#,
        );
        let scorer = config.build(Arc::new(nand_table())).unwrap();
        assert_eq!(scorer.score(&Value::TRUE).behavior, vec![0.0, 0.0, 0.0, -1.0]);
        assert_eq!(scorer.score(&Value::TRUE).penalty, 0.0);
        assert!(scorer.score(&Literal::new(0, Value::FALSE)).penalty < 0.0);
        assert_eq!(scorer.min_improvement(), 0.5);
    }

    #[test]
    fn test_logical_ignores_table() {
        let config = parse(r#"{ "scorer": { "kind": "logical", "arity": 1, "target": [false, true] } }"#);
        assert_eq!(config.occam, None);
        let scorer = config.build(Arc::new(nand_table())).unwrap();
        let score = scorer.score(&Literal::new(0, Value::TRUE));
        assert_eq!(score.behavior, vec![0.0, 0.0]);
    }

    #[test]
    fn test_invalid_band_is_rejected_on_load() {
        let result = serde_json::from_str::<ScoringConfig>(
            r#"{ "scorer": { "kind": "recall", "precision": { "min": 0.9, "max": 0.1, "weight": 1.0 } } }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_output_type_is_checked_on_build() {
        let config = parse(r#"{ "scorer": { "kind": "enum_table" } }"#);
        let err = config.build(Arc::new(nand_table())).unwrap_err();
        assert!(matches!(err, ScorerError::UnsupportedOutputType { .. }));

        let config = parse(r#"{ "scorer": { "kind": "discretized_contin", "thresholds": [] } }"#);
        let err = config.build(Arc::new(nand_table())).unwrap_err();
        assert_eq!(err, ScorerError::EmptyThresholds);
    }

    #[test]
    fn test_contin_defaults_to_squared_error() {
        let config = parse(r#"{ "scorer": { "kind": "contin" } }"#);
        assert_eq!(
            config.scorer,
            ScorerConfig::Contin {
                error: ErrorFunction::Squared
            }
        );
    }

    #[test]
    fn test_serialized_shape() {
        let config = ScoringConfig {
            scorer: ScorerConfig::Prerec {
                recall: ThresholdBand::new(0.5, 1.0, 2.0).unwrap(),
            },
            occam: Some(OccamConfig::Ratio { ratio: 3.0 }),
            normalization: ComplexityNormalization::BestActivation,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "scorer": {
                    "kind": "prerec",
                    "recall": { "min": 0.5, "max": 1.0, "weight": 2.0 }
                },
                "occam": { "kind": "ratio", "ratio": 3.0 },
                "normalization": "best_activation"
            })
        );
    }

    fn enum_table() -> Arc<CompressedTable> {
        let samples = [(true, 1), (false, 0), (false, 0)]
            .into_iter()
            .map(|(a, class)| (vec![Value::from(a)], Value::Enum(class)));
        Arc::new(CompressedTable::from_samples(OutputType::Enum, 1, samples).unwrap())
    }

    #[test]
    fn test_decision_list_scorers() {
        let config: DecisionListScoringConfig =
            serde_json::from_str(r#"{ "scorer": { "kind": "graded", "grading": 0.5 } }"#).unwrap();
        let scorer = config.build(enum_table()).unwrap();

        let predicate: BoxedProgram = Box::new(Literal::new(0, Value::TRUE));
        let candidate = EnumProgram::Cond(DecisionList::new(
            vec![Clause::new(predicate, Value::Enum(1))],
            Value::Enum(0),
        ));
        // rows [F] then [T], both decided correctly
        assert_eq!(scorer.score(&candidate).behavior, vec![0.0, 0.0]);
        assert_eq!(scorer.min_improvement(), -0.05);

        let config: DecisionListScoringConfig =
            serde_json::from_str(r#"{ "scorer": { "kind": "effective", "grading": 1.5 } }"#).unwrap();
        assert_eq!(
            config.build(enum_table()).unwrap_err(),
            ScorerError::InvalidGrading { grading: 1.5 }
        );
    }
}
