/**
* filename : classifier
* author : HAMA
* date: 2025. 5. 11.
* description: 최신 지표 값 → 신호 라벨
**/

use serde::{Deserialize, Serialize};

use crate::error::ScannerError;
use crate::indicators::{is_near_support, is_volume_surge, IndicatorSet};
use super::signal_types::{Qualifier, Signal, SignalLabel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
  pub oversold: f64,
  pub overbought: f64,
  pub volume_surge_multiplier: f64,
  pub support_tolerance: f64,
}

impl Default for ClassifierThresholds {
  fn default() -> Self {
    ClassifierThresholds {
      oversold: 30.0,
      overbought: 70.0,
      volume_surge_multiplier: 1.5,
      support_tolerance: 1.05,
    }
  }
}

impl ClassifierThresholds {
  pub fn validate(&self) -> Result<(), ScannerError> {
    if !(0.0..=100.0).contains(&self.oversold) || !(0.0..=100.0).contains(&self.overbought) {
      return Err(ScannerError::InvalidParameter("RSI thresholds must be within 0..=100".to_string()));
    }
    if self.oversold >= self.overbought {
      return Err(ScannerError::InvalidParameter(format!(
        "oversold ({}) must be below overbought ({})",
        self.oversold, self.overbought
      )));
    }
    if self.volume_surge_multiplier <= 0.0 || self.support_tolerance <= 0.0 {
      return Err(ScannerError::InvalidParameter("multipliers must be positive".to_string()));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
  thresholds: ClassifierThresholds,
}

impl Classifier {
  pub fn new(thresholds: ClassifierThresholds) -> Self {
    Classifier { thresholds }
  }

  /// 최신 RSI 가 없으면 분류하지 않는다 (None).
  pub fn classify(&self, set: &IndicatorSet) -> Option<Signal> {
    let rsi = set.rsi?;

    if rsi < self.thresholds.oversold {
      return Some(self.oversold_signal(set));
    }

    if rsi > self.thresholds.overbought {
      return Some(Signal::new(SignalLabel::Sell));
    }

    Some(Signal::new(SignalLabel::Neutral))
  }

  // 추세 반전 보조 조건 (순서 고정)
  fn oversold_signal(&self, set: &IndicatorSet) -> Signal {
    let mut signal = Signal::new(SignalLabel::Buy);
    let close = set.latest_close;

    if set.macd > set.macd_signal {
      signal = signal.with_qualifier(Qualifier::MacdBullishCrossover);
    }

    let above_mas = match (set.ma_short, set.ma_long) {
      (Some(short), Some(long)) => close > short && close > long,
      _ => false,
    };
    if above_mas {
      signal = signal.with_qualifier(Qualifier::AboveMovingAverages);
    }

    if is_volume_surge(set.latest_volume, set.volume_avg, self.thresholds.volume_surge_multiplier) {
      signal = signal.with_qualifier(Qualifier::VolumeSurge);
    }

    if is_near_support(close, set.support_level, self.thresholds.support_tolerance) {
      signal = signal.with_qualifier(Qualifier::NearSupportLevel);
    }

    signal
  }
}
