//! Configuration validation.
//!
//! Validates all config fields before a backtest runs.

use crate::domain::error::BacksimError;
use crate::domain::exchange::MAX_COMMISSION;
use crate::domain::runner::DEFAULT_CASH;
use crate::ports::config_port::ConfigPort;

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), BacksimError> {
    validate_cash(config)?;
    validate_commission(config)?;
    validate_start(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), BacksimError> {
    validate_strategy_name(config)?;
    validate_windows(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), BacksimError> {
    match config.get_string("data", "file") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(BacksimError::ConfigMissing {
            section: "data".to_string(),
            key: "file".to_string(),
        }),
    }
}

fn validate_cash(config: &dyn ConfigPort) -> Result<(), BacksimError> {
    let value = config.get_double("backtest", "cash", DEFAULT_CASH);
    if value <= 0.0 {
        return Err(BacksimError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "cash".to_string(),
            reason: "cash must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_commission(config: &dyn ConfigPort) -> Result<(), BacksimError> {
    let value = config.get_double("backtest", "commission", 0.0);
    if !(0.0..=MAX_COMMISSION).contains(&value) {
        return Err(BacksimError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "commission".to_string(),
            reason: format!("commission must be within [0, {MAX_COMMISSION}]"),
        });
    }
    Ok(())
}

fn validate_start(config: &dyn ConfigPort) -> Result<(), BacksimError> {
    let value = config.get_int("backtest", "start", 100);
    if value < 0 {
        return Err(BacksimError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start".to_string(),
            reason: "start must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_strategy_name(config: &dyn ConfigPort) -> Result<(), BacksimError> {
    match config.get_string("strategy", "name") {
        None => Ok(()),
        Some(name) if name.trim() == "sma_cross" => Ok(()),
        Some(name) => Err(BacksimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "name".to_string(),
            reason: format!("unknown strategy '{}'", name.trim()),
        }),
    }
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), BacksimError> {
    let fast = config.get_int("strategy", "fast", 30);
    let slow = config.get_int("strategy", "slow", 90);

    if fast < 1 {
        return Err(BacksimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "fast".to_string(),
            reason: "fast window must be at least 1".to_string(),
        });
    }
    if slow < 1 {
        return Err(BacksimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "slow".to_string(),
            reason: "slow window must be at least 1".to_string(),
        });
    }
    if fast >= slow {
        return Err(BacksimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "fast".to_string(),
            reason: format!("fast window ({fast}) must be smaller than slow window ({slow})"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_run_config_passes() {
        let config = make_config(
            r#"
[backtest]
cash = 10000.0
commission = 0.003
start = 100
"#,
        );
        assert!(validate_run_config(&config).is_ok());
    }

    #[test]
    fn empty_run_config_uses_defaults() {
        let config = make_config("[backtest]\n");
        assert!(validate_run_config(&config).is_ok());
    }

    #[test]
    fn zero_cash_rejected() {
        let config = make_config("[backtest]\ncash = 0.0\n");
        let err = validate_run_config(&config).unwrap_err();
        assert!(matches!(err, BacksimError::ConfigInvalid { key, .. } if key == "cash"));
    }

    #[test]
    fn negative_cash_rejected() {
        let config = make_config("[backtest]\ncash = -100\n");
        let err = validate_run_config(&config).unwrap_err();
        assert!(matches!(err, BacksimError::ConfigInvalid { key, .. } if key == "cash"));
    }

    #[test]
    fn commission_above_ceiling_rejected() {
        let config = make_config("[backtest]\ncommission = 0.06\n");
        let err = validate_run_config(&config).unwrap_err();
        assert!(matches!(err, BacksimError::ConfigInvalid { key, .. } if key == "commission"));
    }

    #[test]
    fn negative_commission_rejected() {
        let config = make_config("[backtest]\ncommission = -0.01\n");
        let err = validate_run_config(&config).unwrap_err();
        assert!(matches!(err, BacksimError::ConfigInvalid { key, .. } if key == "commission"));
    }

    #[test]
    fn commission_at_ceiling_passes() {
        let config = make_config("[backtest]\ncommission = 0.05\n");
        assert!(validate_run_config(&config).is_ok());
    }

    #[test]
    fn negative_start_rejected() {
        let config = make_config("[backtest]\nstart = -1\n");
        let err = validate_run_config(&config).unwrap_err();
        assert!(matches!(err, BacksimError::ConfigInvalid { key, .. } if key == "start"));
    }

    #[test]
    fn known_strategy_name_passes() {
        let config = make_config("[strategy]\nname = sma_cross\n");
        assert!(validate_strategy_config(&config).is_ok());
    }

    #[test]
    fn missing_strategy_section_uses_default() {
        let config = make_config("[backtest]\n");
        assert!(validate_strategy_config(&config).is_ok());
    }

    #[test]
    fn unknown_strategy_name_rejected() {
        let config = make_config("[strategy]\nname = momentum\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, BacksimError::ConfigInvalid { key, .. } if key == "name"));
    }

    #[test]
    fn zero_fast_window_rejected() {
        let config = make_config("[strategy]\nfast = 0\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, BacksimError::ConfigInvalid { key, .. } if key == "fast"));
    }

    #[test]
    fn fast_not_smaller_than_slow_rejected() {
        let config = make_config("[strategy]\nfast = 90\nslow = 30\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, BacksimError::ConfigInvalid { key, .. } if key == "fast"));
    }

    #[test]
    fn equal_windows_rejected() {
        let config = make_config("[strategy]\nfast = 50\nslow = 50\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, BacksimError::ConfigInvalid { .. }));
    }

    #[test]
    fn data_file_required() {
        let config = make_config("[data]\n");
        let err = validate_data_config(&config).unwrap_err();
        assert!(matches!(err, BacksimError::ConfigMissing { key, .. } if key == "file"));
    }

    #[test]
    fn data_file_present_passes() {
        let config = make_config("[data]\nfile = prices.csv\n");
        assert!(validate_data_config(&config).is_ok());
    }
}
