/**
* filename : signal_types
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use std::fmt;
use serde::{Serialize, Serializer};

/// 라벨과 보조 조건 구분자
pub const QUALIFIER_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalLabel {
  Buy,      // 과매도
  Sell,     // 과매수
  Neutral,  // 중립
}

impl SignalLabel {
  pub fn as_str(&self) -> &'static str {
    match self {
      SignalLabel::Buy => "BUY (Oversold)",
      SignalLabel::Sell => "SELL (Overbought)",
      SignalLabel::Neutral => "NEUTRAL (Stable)",
    }
  }
}

/// BUY 신호에만 붙는 보조 조건. 선언 순서가 출력 순서다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Qualifier {
  MacdBullishCrossover,
  AboveMovingAverages,
  VolumeSurge,
  NearSupportLevel,
}

impl Qualifier {
  pub fn as_str(&self) -> &'static str {
    match self {
      Qualifier::MacdBullishCrossover => "MACD Bullish Crossover",
      Qualifier::AboveMovingAverages => "Above MAs",
      Qualifier::VolumeSurge => "Volume Surge",
      Qualifier::NearSupportLevel => "Near Support Level",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
  pub label: SignalLabel,
  pub qualifiers: Vec<Qualifier>,
}

impl Signal {
  pub fn new(label: SignalLabel) -> Self {
    Signal {
      label,
      qualifiers: Vec::new(),
    }
  }

  pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
    self.qualifiers.push(qualifier);
    self
  }

  pub fn has(&self, qualifier: Qualifier) -> bool {
    self.qualifiers.contains(&qualifier)
  }
}

impl fmt::Display for Signal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label.as_str())?;
    for qualifier in &self.qualifiers {
      f.write_str(QUALIFIER_SEPARATOR)?;
      f.write_str(qualifier.as_str())?;
    }
    Ok(())
  }
}

impl Serialize for Signal {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}
