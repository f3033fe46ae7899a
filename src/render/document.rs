use crate::foundation::config::RenderConfig;

/// Fixed visual theme of every rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Base font size in points.
    pub font_size_pt: u32,
    /// Page color, RGB.
    pub background: [u8; 3],
    /// `xcolor` name of the text color.
    pub foreground: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl Theme {
    pub fn from_config(cfg: &RenderConfig) -> Self {
        Self {
            font_size_pt: cfg.font_size_pt,
            background: cfg.background,
            foreground: cfg.foreground.clone(),
        }
    }

    /// Document preamble up to and including `\begin{document}`.
    pub fn preamble(&self) -> String {
        let [r, g, b] = self.background;
        format!(
            "\\documentclass[varwidth,{pt}pt]{{standalone}}\n\
             \\usepackage{{amsmath,amsfonts,xcolor}}\n\
             \\makeatletter\n\
             \\newcommand{{\\globalcolor}}[1]{{%\n\
             \\color{{#1}}\\global\\let\\default@color\\current@color}}\n\
             \\makeatother\n\
             \\definecolor{{background}}{{RGB}}{{{r}, {g}, {b}}}\n\
             \\AtBeginDocument{{\\globalcolor{{{fg}}}}}\n\
             \\pagecolor{{background}}\n\
             \\begin{{document}}\n",
            pt = self.font_size_pt,
            fg = self.foreground,
        )
    }

    /// Complete standalone document typesetting `body` (LaTeX math source) in display style.
    pub fn document(&self, body: &str) -> String {
        format!(
            "{}$\\displaystyle {body}$\n\\end{{document}}\n",
            self.preamble()
        )
    }
}
