// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tweetscope_app::copy::{ABOUT, CONTACT, INTRODUCTION};
use tweetscope_app::{ChartSpec, ContentError, ContentProvider, ContentRef, SectionBody};
use tweetscope_data::{
    ArtifactKind, DataSource, DatasetInfo, TWEET_COLUMN, describe, missing_values,
};

/// Serves section content straight from the data directory. Every request
/// re-reads the files it needs.
pub struct DatasetRuntime {
    source: DataSource,
    preview_rows: usize,
}

impl DatasetRuntime {
    pub fn new(source: DataSource, preview_rows: usize) -> Self {
        Self {
            source,
            preview_rows,
        }
    }

    fn artifact_preview(&self, kind: ArtifactKind) -> Result<SectionBody, ContentError> {
        let primary = self.source.load_primary()?;
        let artifact = self.source.load_artifact_for(kind, &primary)?;
        Ok(SectionBody::Dataset(artifact.preview(self.preview_rows)))
    }
}

impl ContentProvider for DatasetRuntime {
    fn produce(&mut self, content: ContentRef) -> Result<SectionBody, ContentError> {
        tracing::debug!(content = content.as_str(), "producing section");
        let body = match content {
            ContentRef::Introduction => SectionBody::Text(INTRODUCTION.to_owned()),
            ContentRef::About => SectionBody::Text(ABOUT.to_owned()),
            ContentRef::Contact => SectionBody::Text(CONTACT.to_owned()),
            ContentRef::DatasetInfo => {
                let dataset = self.source.load_primary()?;
                SectionBody::Text(DatasetInfo::of(&dataset).render_text())
            }
            ContentRef::DatasetDescription => {
                SectionBody::Table(describe(&self.source.load_primary()?))
            }
            ContentRef::DatasetOverview => {
                SectionBody::Dataset(self.source.load_primary()?.preview(self.preview_rows))
            }
            ContentRef::MissingValues => {
                SectionBody::Table(missing_values(&self.source.load_primary()?))
            }
            ContentRef::ClassBarChart => {
                let counts = self.source.load_primary()?.class_counts()?;
                SectionBody::Chart(ChartSpec::bar(&counts)?)
            }
            ContentRef::ClassPieChart => {
                let counts = self.source.load_primary()?.class_counts()?;
                SectionBody::Chart(ChartSpec::pie(&counts)?)
            }
            ContentRef::RawTweets => SectionBody::Dataset(
                self.source
                    .load_primary()?
                    .column_preview(TWEET_COLUMN, self.preview_rows)?,
            ),
            ContentRef::CleanedTweets => self.artifact_preview(ArtifactKind::Cleaned)?,
            ContentRef::StemmedTweets => self.artifact_preview(ArtifactKind::Stemmed)?,
            ContentRef::TokenizedTweets => self.artifact_preview(ArtifactKind::Tokenized)?,
        };
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::DatasetRuntime;
    use anyhow::Result;
    use tweetscope_app::{
        ChartKind, ContentProvider, ContentRef, MenuDefinition, NoticeKind, SectionBody,
        TweetClass, ViewRouter,
    };
    use tweetscope_data::{DataFiles, DataSource};
    use tweetscope_testkit::{FixtureDir, rows_with_classes};

    fn runtime_for(fixture: &FixtureDir) -> DatasetRuntime {
        DatasetRuntime::new(DataSource::new(fixture.path(), DataFiles::default()), 5)
    }

    #[test]
    fn every_content_ref_renders_from_standard_fixture() -> Result<()> {
        let fixture = FixtureDir::standard(12)?;
        let mut runtime = runtime_for(&fixture);
        for content in ContentRef::ALL {
            let body = runtime.produce(content)?;
            assert!(body.notice_kind().is_none(), "{content:?} failed");
        }
        Ok(())
    }

    #[test]
    fn bar_chart_binds_counts_to_class_names() -> Result<()> {
        let fixture = FixtureDir::new()?;
        let mut classes = vec![2; 2];
        classes.extend([1; 5]);
        classes.extend([0; 10]);
        fixture.write_dataset(&rows_with_classes(&classes))?;

        let SectionBody::Chart(chart) = runtime_for(&fixture).produce(ContentRef::ClassBarChart)?
        else {
            panic!("expected chart body");
        };
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.value_for(TweetClass::HateSpeech), Some(10));
        assert_eq!(chart.value_for(TweetClass::OffensiveLanguage), Some(5));
        assert_eq!(chart.value_for(TweetClass::Neither), Some(2));
        Ok(())
    }

    #[test]
    fn previews_respect_configured_row_limit() -> Result<()> {
        let fixture = FixtureDir::standard(12)?;
        let mut runtime = runtime_for(&fixture);

        let SectionBody::Dataset(overview) = runtime.produce(ContentRef::DatasetOverview)? else {
            panic!("expected dataset body");
        };
        assert_eq!(overview.total_rows, 12);
        assert_eq!(overview.preview.row_count(), 5);

        let SectionBody::Dataset(raw) = runtime.produce(ContentRef::RawTweets)? else {
            panic!("expected dataset body");
        };
        assert_eq!(raw.preview.columns, vec!["", "tweet"]);
        Ok(())
    }

    #[test]
    fn missing_stemmed_artifact_only_fails_its_tab() -> Result<()> {
        let fixture = FixtureDir::standard(6)?;
        fixture.remove("stemmed_tweets.csv")?;
        let mut runtime = runtime_for(&fixture);
        let mut router = ViewRouter::new(MenuDefinition::dashboard()?);
        router.select("preprocessing")?;

        let mut kinds = Vec::new();
        for tab in ["raw", "cleaned", "stemmed", "tokenized"] {
            let view = router.activate_tab(tab)?.render(&mut runtime);
            kinds.push(view.sections[0].body.notice_kind());
        }
        assert_eq!(
            kinds,
            vec![None, None, Some(NoticeKind::MissingArtifact), None]
        );
        Ok(())
    }

    #[test]
    fn empty_dataset_renders_notice_in_distribution_view() -> Result<()> {
        let fixture = FixtureDir::new()?;
        fixture.write_dataset(&[])?;
        let mut runtime = runtime_for(&fixture);
        let mut router = ViewRouter::new(MenuDefinition::dashboard()?);

        let bar = router.select("distribution")?.render(&mut runtime);
        assert!(bar.has_empty_dataset());
        let pie = router.activate_tab("pie")?.render(&mut runtime);
        assert!(pie.has_empty_dataset());
        Ok(())
    }

    #[test]
    fn empty_dataset_previews_render_without_rows() -> Result<()> {
        let fixture = FixtureDir::standard(0)?;
        let mut runtime = runtime_for(&fixture);
        let mut router = ViewRouter::new(MenuDefinition::dashboard()?);

        router.select("preview")?;
        let info_view = router.activate_tab("info")?.render(&mut runtime);
        let SectionBody::Text(info) = &info_view.sections[0].body else {
            panic!("expected text body, got {:?}", info_view.sections[0].body);
        };
        assert!(info.starts_with("RangeIndex: 0 entries\n"));

        let describe = router.activate_tab("describe")?.render(&mut runtime);
        let SectionBody::Table(describe) = &describe.sections[0].body else {
            panic!("expected table body");
        };
        assert_eq!(describe.rows.len(), 11);
        assert_eq!(describe.rows[0][0], "count");
        assert!(describe.rows[0][1..].iter().all(|cell| cell == "0"));
        assert!(
            describe.rows[1..]
                .iter()
                .all(|row| row[1..].iter().all(String::is_empty))
        );

        let missing = router.activate_tab("missing")?.render(&mut runtime);
        let SectionBody::Table(missing) = &missing.sections[0].body else {
            panic!("expected table body");
        };
        assert_eq!(missing.rows.len(), 7);
        assert!(missing.rows.iter().all(|row| row[1] == "0"));

        let mut totals = Vec::new();
        for (view, tab) in [
            ("preview", "overview"),
            ("preprocessing", "raw"),
            ("preprocessing", "cleaned"),
            ("preprocessing", "stemmed"),
            ("preprocessing", "tokenized"),
        ] {
            router.select(view)?;
            let rendered = router.activate_tab(tab)?.render(&mut runtime);
            match &rendered.sections[0].body {
                SectionBody::Dataset(dataset) => {
                    totals.push(dataset.total_rows);
                    assert_eq!(dataset.preview.row_count(), 0);
                }
                other => panic!("{view}/{tab} rendered {other:?}"),
            }
        }
        assert_eq!(totals, vec![0; 5]);
        Ok(())
    }

    #[test]
    fn refresh_picks_up_rewritten_dataset() -> Result<()> {
        let fixture = FixtureDir::new()?;
        fixture.write_dataset(&rows_with_classes(&[1, 1]))?;
        let mut runtime = runtime_for(&fixture);
        let router = ViewRouter::with_default(MenuDefinition::dashboard()?, "distribution")?;

        let before = router.current().render(&mut runtime);
        fixture.write_dataset(&rows_with_classes(&[1, 1, 0]))?;
        let after = router.current().render(&mut runtime);

        let value = |view: &tweetscope_app::RenderedView| match &view.sections[0].body {
            SectionBody::Chart(chart) => chart.value_for(TweetClass::HateSpeech),
            _ => None,
        };
        assert_eq!(value(&before), Some(0));
        assert_eq!(value(&after), Some(1));
        Ok(())
    }
}
