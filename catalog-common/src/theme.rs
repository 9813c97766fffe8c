use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 界面主题
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

/// 主题颜色 - CSS 变量使用的 RGB 三元组
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeColors {
    pub dark: &'static str,
    pub light: &'static str,
}

const DARK_RGB: &str = "10, 10, 20";
const LIGHT_RGB: &str = "255, 255, 255";

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Day => ThemeColors { dark: DARK_RGB, light: LIGHT_RGB },
            Theme::Night => ThemeColors { dark: LIGHT_RGB, light: DARK_RGB },
        }
    }

    /// 切换到另一个主题
    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(Theme::Day),
            "night" => Ok(Theme::Night),
            other => Err(format!("未知主题: {}", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
