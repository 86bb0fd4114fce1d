/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T,SkylineFlightError>;

#[derive(Error,Debug)]
pub enum SkylineFlightError {

    #[error("invalid coordinate {0}")]
    InvalidCoordinate(String),

    #[error("invalid route {0}")]
    InvalidRoute(String),

    #[error("config error {0}")]
    ConfigError(String),

    #[error("parse error {0}")]
    ParseError(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("RON error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("channel closed {0}")]
    ChannelClosed(String),

    #[error("operation failed {0}")]
    OpFailedError(String)
}

impl From<skyline_common::SkylineCommonError> for SkylineFlightError {
    fn from (e: skyline_common::SkylineCommonError) -> Self {
        use skyline_common::SkylineCommonError::*;
        match e {
            InvalidCoordinate(msg) => SkylineFlightError::InvalidCoordinate(msg),
            ParseError(msg) => SkylineFlightError::ParseError(msg),
        }
    }
}

impl From<kanal::SendError> for SkylineFlightError {
    fn from (e: kanal::SendError) -> Self { SkylineFlightError::ChannelClosed( e.to_string()) }
}

impl From<kanal::ReceiveError> for SkylineFlightError {
    fn from (e: kanal::ReceiveError) -> Self { SkylineFlightError::ChannelClosed( e.to_string()) }
}

macro_rules! invalid_route {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::SkylineFlightError::InvalidRoute( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_route;
