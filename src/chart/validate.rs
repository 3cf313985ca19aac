use crate::{
    chart::request::ChartRequest,
    error::ChartError,
    params::{LayoutEngine, OutputFormat},
};

/// A request whose parameters passed validation and can go to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedChart {
    pub layout: LayoutEngine,
    pub format: OutputFormat,
    pub definition: String,
}

impl ChartRequest {
    /// Checks chart type, then output format, then definition. Only the
    /// first failure is reported.
    pub fn validate(&self) -> Result<ValidatedChart, ChartError> {
        let layout = LayoutEngine::from_chart_type(self.chart_type())
            .ok_or(ChartError::InvalidChartType)?;

        let format = self
            .output_format()
            .parse::<OutputFormat>()
            .map_err(|_| ChartError::InvalidOutputFormat)?;

        if self.chart_definition().trim().is_empty() {
            return Err(ChartError::EmptyChartDefinition);
        }

        Ok(ValidatedChart {
            layout,
            format,
            definition: self.chart_definition().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_request() {
        let chart = ChartRequest::new("circo", "png", "graph{a--b;}")
            .validate()
            .unwrap();
        assert_eq!(chart.layout, LayoutEngine::Circo);
        assert_eq!(chart.format, OutputFormat::Png);
        assert_eq!(chart.definition, "graph{a--b;}");
    }

    #[test]
    fn prefixed_chart_type_matches_bare_one() {
        let prefixed = ChartRequest::new("gv:circo", "png", "graph{a--b;}").validate().unwrap();
        let bare = ChartRequest::new("circo", "png", "graph{a--b;}").validate().unwrap();
        assert_eq!(prefixed, bare);
    }

    #[test]
    fn chart_type_is_checked_first() {
        let err = ChartRequest::new("", "", "").validate().unwrap_err();
        assert!(matches!(err, ChartError::InvalidChartType));

        let err = ChartRequest::new("graph", "svg", " ").validate().unwrap_err();
        assert!(matches!(err, ChartError::InvalidChartType));
    }

    #[test]
    fn output_format_is_checked_before_definition() {
        let err = ChartRequest::new("dot", "svg", "").validate().unwrap_err();
        assert!(matches!(err, ChartError::InvalidOutputFormat));

        let err = ChartRequest::new("dot", "", "graph{}").validate().unwrap_err();
        assert!(matches!(err, ChartError::InvalidOutputFormat));
    }

    #[test]
    fn blank_definition_is_rejected() {
        for chl in ["", "   ", "\n\t \r\n"] {
            let err = ChartRequest::new("dot", "png", chl).validate().unwrap_err();
            assert!(matches!(err, ChartError::EmptyChartDefinition));
        }
    }

    #[test]
    fn definition_is_passed_through_untrimmed() {
        let chart = ChartRequest::new("dot", "png", "\n graph{} \n").validate().unwrap();
        assert_eq!(chart.definition, "\n graph{} \n");
    }
}
