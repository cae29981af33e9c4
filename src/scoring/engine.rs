use super::verdict::{PricePosition, RiskLevel, Verdict, VerdictLabel};
use crate::error::{InvalidInput, RentError};
use crate::market::PriceRange;

/// Score at the market average.
const AVG_SCORE: f64 = 40.0;
/// Score at the market maximum.
const MAX_RANGE_SCORE: f64 = 60.0;
const CEILING_SCORE: f64 = 100.0;

/// Percent above max at which an asking price is highway robbery.
const ROBBERY_PERCENT: f64 = 50.0;
/// Percent above max at which overpricing becomes extreme greed.
const EXTREME_GREED_PERCENT: f64 = 20.0;
/// Overpriced listings at or below this percent above max are moderate risk.
const MODERATE_RISK_PERCENT: f64 = 10.0;

/// Score an asking price against a market range.
///
/// The score rises piecewise-linearly: 0 at or below `min`, 40 at `avg`, 60 at
/// `max`, then 60..100 across the first 50% above `max`, saturating at 100.
/// It is non-decreasing in `asking` and continuous at `max` whenever `max > avg`.
///
/// # Errors
///
/// Returns [`RentError::InvalidInput`] when `asking` is not a positive finite number.
pub fn score(range: &PriceRange, asking: f64) -> Result<Verdict, RentError> {
    validate_asking(asking)?;

    let (min, avg, max) = (range.min(), range.avg(), range.max());
    let percent_diff_from_avg = (asking - avg) / avg * 100.0;

    let (label, score, percent_above_max) = if asking <= min {
        (VerdictLabel::GreatDeal, 0.0, 0.0)
    } else if asking <= avg {
        let score = if avg == min {
            AVG_SCORE
        } else {
            AVG_SCORE * (asking - min) / (avg - min)
        };
        (VerdictLabel::FairPrice, score, 0.0)
    } else if asking <= max {
        let score = if max == avg {
            MAX_RANGE_SCORE
        } else {
            AVG_SCORE + (MAX_RANGE_SCORE - AVG_SCORE) * (asking - avg) / (max - avg)
        };
        (VerdictLabel::FairPrice, score, 0.0)
    } else {
        let percent_above = (asking - max) / max * 100.0;
        if percent_above >= ROBBERY_PERCENT {
            (VerdictLabel::HighwayRobbery, CEILING_SCORE, percent_above)
        } else {
            let score = (MAX_RANGE_SCORE
                + percent_above / ROBBERY_PERCENT * (CEILING_SCORE - MAX_RANGE_SCORE))
                .clamp(MAX_RANGE_SCORE, CEILING_SCORE);
            let label = if percent_above < EXTREME_GREED_PERCENT {
                VerdictLabel::Overpriced
            } else {
                VerdictLabel::ExtremeGreed
            };
            (label, score, percent_above)
        }
    };

    let risk_level = risk_level(label, percent_above_max);
    Ok(Verdict {
        label,
        score,
        risk_level,
        percent_above_max,
        percent_diff_from_avg,
        position: position(range, asking),
        recommendation: risk_level.recommendation().to_string(),
    })
}

/// The range itself, for queries that carry no asking price.
pub fn range_only(range: &PriceRange) -> PriceRange {
    *range
}

fn validate_asking(asking: f64) -> Result<(), InvalidInput> {
    if !asking.is_finite() {
        return Err(InvalidInput::NonFiniteAsking(asking));
    }
    if asking <= 0.0 {
        return Err(InvalidInput::NonPositiveAsking(asking));
    }
    Ok(())
}

fn risk_level(label: VerdictLabel, percent_above_max: f64) -> RiskLevel {
    match label {
        VerdictLabel::GreatDeal | VerdictLabel::FairPrice => RiskLevel::Low,
        VerdictLabel::Overpriced if percent_above_max <= MODERATE_RISK_PERCENT => {
            RiskLevel::Moderate
        }
        VerdictLabel::Overpriced => RiskLevel::High,
        VerdictLabel::ExtremeGreed => RiskLevel::VeryHigh,
        VerdictLabel::HighwayRobbery => RiskLevel::Critical,
    }
}

fn position(range: &PriceRange, asking: f64) -> PricePosition {
    if asking < range.min() {
        PricePosition::BelowMin
    } else if asking < range.avg() {
        PricePosition::BelowAverage
    } else if asking == range.avg() {
        PricePosition::AtAverage
    } else if asking <= range.max() {
        PricePosition::AboveAverage
    } else {
        PricePosition::AboveMax {
            percent: (asking - range.max()) / range.max() * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    fn range(min: f64, avg: f64, max: f64) -> PriceRange {
        PriceRange::new(min, avg, max).unwrap()
    }

    fn standard() -> PriceRange {
        range(500_000.0, 800_000.0, 1_200_000.0)
    }

    #[test]
    fn test_extreme_greed_scenario() {
        let verdict = score(&standard(), 1_500_000.0).unwrap();
        assert_eq!(verdict.label, VerdictLabel::ExtremeGreed);
        assert_float_absolute_eq!(verdict.percent_above_max, 25.0, 1e-9);
        assert_float_absolute_eq!(verdict.score, 80.0, 1e-9);
        assert_eq!(verdict.risk_level, RiskLevel::VeryHigh);
    }

    #[test]
    fn test_asking_at_max_is_fair_price() {
        let verdict = score(&range(400_000.0, 600_000.0, 900_000.0), 900_000.0).unwrap();
        assert_eq!(verdict.label, VerdictLabel::FairPrice);
        assert_eq!(verdict.score, 60.0);
        assert_eq!(verdict.percent_above_max, 0.0);
    }

    #[test]
    fn test_midway_between_avg_and_max() {
        let verdict = score(&range(1_500_000.0, 2_000_000.0, 3_000_000.0), 2_500_000.0).unwrap();
        assert_eq!(verdict.label, VerdictLabel::FairPrice);
        assert_eq!(verdict.score, 50.0);
        assert_eq!(verdict.position, PricePosition::AboveAverage);
        assert_float_absolute_eq!(verdict.percent_diff_from_avg, 25.0, 1e-9);
    }

    #[test]
    fn test_below_min_is_great_deal_regardless_of_magnitude() {
        for asking in [1.0, 100.0, 250_000.0, 499_999.99] {
            let verdict = score(&standard(), asking).unwrap();
            assert_eq!(verdict.label, VerdictLabel::GreatDeal);
            assert_eq!(verdict.score, 0.0);
            assert_eq!(verdict.risk_level, RiskLevel::Low);
            assert_eq!(verdict.position, PricePosition::BelowMin);
        }
    }

    #[test]
    fn test_boundary_values() {
        let r = standard();
        let at_min = score(&r, r.min()).unwrap();
        assert_eq!(at_min.score, 0.0);
        assert_eq!(at_min.label, VerdictLabel::GreatDeal);
        assert_eq!(score(&r, r.avg()).unwrap().score, 40.0);
        assert_eq!(score(&r, r.max()).unwrap().score, 60.0);
    }

    #[test]
    fn test_below_average_band_is_fair_price() {
        let verdict = score(&standard(), 650_000.0).unwrap();
        assert_eq!(verdict.label, VerdictLabel::FairPrice);
        assert_float_absolute_eq!(verdict.score, 20.0, 1e-9);
        assert_eq!(verdict.position, PricePosition::BelowAverage);
        assert!(verdict.percent_diff_from_avg < 0.0);
    }

    #[test]
    fn test_fifty_percent_above_is_highway_robbery() {
        let verdict = score(&range(500_000.0, 800_000.0, 1_000_000.0), 1_500_000.0).unwrap();
        assert_eq!(verdict.percent_above_max, 50.0);
        assert_eq!(verdict.score, 100.0);
        assert_eq!(verdict.label, VerdictLabel::HighwayRobbery);
        assert_eq!(verdict.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_far_above_saturates_at_hundred() {
        let verdict = score(&standard(), 50_000_000.0).unwrap();
        assert_eq!(verdict.score, 100.0);
        assert_eq!(verdict.label, VerdictLabel::HighwayRobbery);
    }

    #[test]
    fn test_overpriced_band_and_risk_split() {
        let r = range(500_000.0, 800_000.0, 1_000_000.0);

        let slight = score(&r, 1_050_000.0).unwrap();
        assert_eq!(slight.label, VerdictLabel::Overpriced);
        assert_eq!(slight.risk_level, RiskLevel::Moderate);
        assert_float_absolute_eq!(slight.score, 64.0, 1e-9);

        let nine = score(&r, 1_090_000.0).unwrap();
        assert_eq!(nine.risk_level, RiskLevel::Moderate);

        let high = score(&r, 1_150_000.0).unwrap();
        assert_eq!(high.label, VerdictLabel::Overpriced);
        assert_eq!(high.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_twenty_percent_is_extreme_greed() {
        let verdict = score(&range(500_000.0, 800_000.0, 1_000_000.0), 1_200_000.0).unwrap();
        assert_eq!(verdict.label, VerdictLabel::ExtremeGreed);
        assert_float_absolute_eq!(verdict.score, 76.0, 1e-9);
    }

    #[test]
    fn test_continuous_just_above_max() {
        let r = standard();
        let verdict = score(&r, r.max() * (1.0 + 1e-12)).unwrap();
        assert_eq!(verdict.label, VerdictLabel::Overpriced);
        assert_float_absolute_eq!(verdict.score, 60.0, 1e-6);
    }

    #[test]
    fn test_score_is_bounded_and_monotonic() {
        for r in [
            standard(),
            range(100.0, 100.0, 100.0),
            range(100.0, 100.0, 300.0),
            range(100.0, 250.0, 250.0),
            range(1.0, 1_000.0, 1_000_000.0),
        ] {
            let mut previous = f64::NEG_INFINITY;
            for step in 1..=4_000 {
                let asking = r.max() * 2.0 * step as f64 / 4_000.0;
                let s = score(&r, asking).unwrap().score;
                assert!((0.0..=100.0).contains(&s), "score {s} out of bounds at {asking}");
                assert!(s >= previous, "score decreased at {asking}: {previous} -> {s}");
                previous = s;
            }
        }
    }

    #[test]
    fn test_degenerate_ranges() {
        // max == avg: the upper in-range band is empty, so avg scores 40 and anything above is overpriced
        let flat_top = range(100.0, 200.0, 200.0);
        assert_eq!(score(&flat_top, 200.0).unwrap().score, 40.0);
        assert_eq!(score(&flat_top, 201.0).unwrap().label, VerdictLabel::Overpriced);

        // min == avg == max: at the point it is a great deal, above it overpriced
        let point = range(100.0, 100.0, 100.0);
        assert_eq!(score(&point, 100.0).unwrap().label, VerdictLabel::GreatDeal);
        assert_float_absolute_eq!(score(&point, 110.0).unwrap().score, 68.0, 1e-9);
    }

    #[test]
    fn test_scores_are_not_rounded() {
        let verdict = score(&standard(), 555_555.0).unwrap();
        assert_float_absolute_eq!(verdict.score, 40.0 * 55_555.0 / 300_000.0, 1e-12);
        assert!(verdict.score.fract() != 0.0);
    }

    #[test]
    fn test_percent_diff_from_avg_is_signed() {
        let r = standard();
        assert_float_absolute_eq!(score(&r, 400_000.0).unwrap().percent_diff_from_avg, -50.0, 1e-9);
        assert_eq!(score(&r, 800_000.0).unwrap().percent_diff_from_avg, 0.0);
        assert_eq!(score(&r, 800_000.0).unwrap().position, PricePosition::AtAverage);
    }

    #[test]
    fn test_rejects_non_positive_asking() {
        let r = standard();
        assert_eq!(
            score(&r, 0.0).unwrap_err(),
            RentError::InvalidInput(InvalidInput::NonPositiveAsking(0.0))
        );
        assert!(score(&r, -10.0).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_rejects_non_finite_asking() {
        let r = standard();
        assert!(score(&r, f64::NAN).unwrap_err().is_invalid_input());
        assert!(score(&r, f64::INFINITY).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_recommendation_follows_risk() {
        let verdict = score(&standard(), 2_000_000.0).unwrap();
        assert_eq!(verdict.recommendation, RiskLevel::Critical.recommendation());
    }

    #[test]
    fn test_range_only_passthrough() {
        let r = standard();
        assert_eq!(range_only(&r), r);
    }

    #[test]
    fn test_deterministic() {
        let r = standard();
        assert_eq!(score(&r, 1_234_567.0).unwrap(), score(&r, 1_234_567.0).unwrap());
    }
}
