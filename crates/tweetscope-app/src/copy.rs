// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Static page text for the dashboard's descriptive views.

pub const INTRODUCTION: &str = "This dataset contains data related to hate speech and offensive language. \
Davidson introduced a dataset of tweets categorized using a crowdsourced hate speech vocabulary. \
These tweets were classified into three categories: hate speech, offensive language, and neither. \
The dataset, consisting of 24,802 labeled tweets, includes columns for the number of CrowdFlower coders, \
the count of hate speech and offensive language identifications, and a class label indicating \
the majority opinion: 0 for hate speech, 1 for offensive language, and 2 for neither.

The dataset was published in:

Davidson, T., Warmsley, D., Macy, M., & Weber, I. (2017, May). Automated hate speech \
detection and the problem of offensive language. In Proceedings of the international \
AAAI conference on web and social media (Vol. 11, No. 1, pp. 512-515).

The dataset can be downloaded from:

https://www.kaggle.com/datasets/mrmorj/hate-speech-and-offensive-language-dataset

https://github.com/t-davidson/hate-speech-and-offensive-language";

pub const ABOUT: &str = "This is the about page.";

pub const CONTACT: &str = "This is the contact page.";
