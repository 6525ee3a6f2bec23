//! Linear price model over fixed coefficients.

use serde::{Deserialize, Serialize};
use waypoint_core::{AppError, Coefficients, ParsePolicy, Params};

/// Parameter names of the ten integer features, in formula order.
pub const FEATURE_FIELDS: [&str; 10] = [
    "bedrooms",
    "bathrooms",
    "stories",
    "mainroad",
    "guestroom",
    "basement",
    "hotwaterheating",
    "airconditioning",
    "parking",
    "prefarea",
];

/// Inputs of one prediction
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseFeatures {
    pub area: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub stories: i64,
    pub mainroad: i64,
    pub guestroom: i64,
    pub basement: i64,
    pub hotwaterheating: i64,
    pub airconditioning: i64,
    pub parking: i64,
    pub prefarea: i64,
}

impl HouseFeatures {
    /// Read features from request parameters.
    ///
    /// Under `ParsePolicy::Lenient` a missing or malformed value counts as
    /// zero; under `ParsePolicy::Strict` it is an `AppError::Input`.
    pub fn from_params(params: &Params, policy: ParsePolicy) -> Result<Self, AppError> {
        let area = read(params, "area", policy)?;
        let mut ints = [0i64; 10];
        for (slot, field) in ints.iter_mut().zip(FEATURE_FIELDS) {
            *slot = read(params, field, policy)?;
        }

        let [bedrooms, bathrooms, stories, mainroad, guestroom, basement, hotwaterheating, airconditioning, parking, prefarea] =
            ints;

        Ok(Self {
            area,
            bedrooms,
            bathrooms,
            stories,
            mainroad,
            guestroom,
            basement,
            hotwaterheating,
            airconditioning,
            parking,
            prefarea,
        })
    }
}

fn read<T>(params: &Params, field: &str, policy: ParsePolicy) -> Result<T, AppError>
where
    T: std::str::FromStr + Default,
{
    let raw = params.get(field);
    match (raw.map(str::parse::<T>), policy) {
        (Some(Ok(value)), _) => Ok(value),
        (_, ParsePolicy::Lenient) => Ok(T::default()),
        (None, ParsePolicy::Strict) => Err(AppError::Input(format!("missing {}", field))),
        (Some(Err(_)), ParsePolicy::Strict) => Err(AppError::Input(format!(
            "invalid {}: {:?}",
            field,
            raw.unwrap_or_default()
        ))),
    }
}

/// Raw model output before truncation.
pub fn evaluate(coefficients: &Coefficients, features: &HouseFeatures) -> f64 {
    let c = coefficients;
    let f = features;
    c.theta0
        + f.area * c.area
        + f.bedrooms as f64 * c.bedrooms
        + f.bathrooms as f64 * c.bathrooms
        + f.stories as f64 * c.stories
        + f.mainroad as f64 * c.mainroad
        + f.guestroom as f64 * c.guestroom
        + f.basement as f64 * c.basement
        + f.hotwaterheating as f64 * c.hotwaterheating
        + f.airconditioning as f64 * c.airconditioning
        + f.parking as f64 * c.parking
        + f.prefarea as f64 * c.prefarea
}

/// Model output truncated toward zero. Out-of-range values saturate and
/// NaN becomes 0.
pub fn truncate(value: f64) -> i64 {
    value as i64
}

/// Evaluates the model for request parameters.
#[derive(Debug, Clone, Default)]
pub struct Predictor {
    coefficients: Coefficients,
    policy: ParsePolicy,
}

impl Predictor {
    pub fn new(coefficients: Coefficients, policy: ParsePolicy) -> Self {
        Self {
            coefficients,
            policy,
        }
    }

    pub fn policy(&self) -> ParsePolicy {
        self.policy
    }

    pub fn predict(&self, features: &HouseFeatures) -> i64 {
        let raw = evaluate(&self.coefficients, features);
        tracing::info!("Predicted value: {}", raw);
        truncate(raw)
    }

    pub fn predict_params(&self, params: &Params) -> Result<i64, AppError> {
        let features = HouseFeatures::from_params(params, self.policy)?;
        Ok(self.predict(&features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "area=1000&bedrooms=2&bathrooms=1&stories=2&mainroad=1&guestroom=0\
        &basement=1&hotwaterheating=0&airconditioning=1&parking=1&prefarea=1";

    #[test]
    fn test_reference_example() {
        let predictor = Predictor::default();
        let value = predictor.predict_params(&Params::parse(EXAMPLE)).unwrap();
        assert_eq!(value, 875_971);
    }

    #[test]
    fn test_formula_matches_hand_expansion() {
        let c = Coefficients::default();
        let features = HouseFeatures::from_params(&Params::parse(EXAMPLE), ParsePolicy::Strict)
            .unwrap();
        let expected = c.theta0
            + 1000.0 * c.area
            + 2.0 * c.bedrooms
            + c.bathrooms
            + 2.0 * c.stories
            + c.mainroad
            + c.basement
            + c.airconditioning
            + c.parking
            + c.prefarea;
        assert!((evaluate(&c, &features) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic() {
        let predictor = Predictor::default();
        let params = Params::parse(EXAMPLE);
        let first = predictor.predict_params(&params).unwrap();
        for _ in 0..10 {
            assert_eq!(predictor.predict_params(&params).unwrap(), first);
        }
    }

    #[test]
    fn test_lenient_treats_garbage_as_zero() {
        let predictor = Predictor::default();
        let params = Params::parse("area=abc&bedrooms=2.5&bathrooms=");
        let features = HouseFeatures::from_params(&params, ParsePolicy::Lenient).unwrap();
        assert_eq!(features, HouseFeatures::default());
        // Only the intercept remains, which truncates to 0
        assert_eq!(predictor.predict_params(&params).unwrap(), 0);
    }

    #[test]
    fn test_strict_rejects_malformed_value() {
        let params = Params::parse(&EXAMPLE.replace("bedrooms=2", "bedrooms=two"));
        let err = HouseFeatures::from_params(&params, ParsePolicy::Strict).unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
        assert_eq!(err.to_string(), "invalid bedrooms: \"two\"");
    }

    #[test]
    fn test_strict_rejects_missing_value() {
        let params = Params::parse("area=1000");
        let err = HouseFeatures::from_params(&params, ParsePolicy::Strict).unwrap_err();
        assert_eq!(err.to_string(), "missing bedrooms");
    }

    #[test]
    fn test_strict_quotes_empty_value() {
        let params = Params::parse(&EXAMPLE.replace("parking=1", "parking="));
        let err = HouseFeatures::from_params(&params, ParsePolicy::Strict).unwrap_err();
        assert_eq!(err.to_string(), "invalid parking: \"\"");
    }

    #[test]
    fn test_fractional_area_accepted() {
        let features =
            HouseFeatures::from_params(&Params::parse("area=1500.5"), ParsePolicy::Lenient)
                .unwrap();
        assert_eq!(features.area, 1500.5);
        assert_eq!(Predictor::default().predict(&features), 1_314_389);
    }

    #[test]
    fn test_truncates_toward_zero() {
        assert_eq!(truncate(2.99), 2);
        assert_eq!(truncate(-2.99), -2);
        assert_eq!(truncate(f64::NAN), 0);
        assert_eq!(truncate(f64::INFINITY), i64::MAX);

        let features = HouseFeatures {
            area: -10.0,
            ..HouseFeatures::default()
        };
        // -8759.47... truncates to -8759, not -8760
        assert_eq!(Predictor::default().predict(&features), -8759);
    }

    #[test]
    fn test_custom_coefficients() {
        let coefficients = Coefficients {
            theta0: 100.0,
            area: 2.0,
            parking: 50.0,
            ..Coefficients::default()
        };
        let predictor = Predictor::new(coefficients, ParsePolicy::Lenient);
        let features = HouseFeatures {
            area: 10.0,
            parking: 2,
            ..HouseFeatures::default()
        };
        let expected = 100.0 + 20.0 + 100.0;
        assert_eq!(predictor.predict(&features), expected as i64);
    }
}
