// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{ForyDefault, Serializer};
use crate::types::{ForyGeneralList, DURATION, LOCAL_DATE, TIMESTAMP};
use crate::util::EPOCH;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use std::mem;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Wall-clock calendar date: signed 32-bit days since 1970-01-01.
impl Serializer for NaiveDate {
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        let days = self.signed_duration_since(*EPOCH).num_days();
        if days < i32::MIN as i64 || days > i32::MAX as i64 {
            return Err(Error::invalid_value(format!(
                "date is {days} days from epoch, outside the 32-bit range"
            )));
        }
        context.writer.write_i32(days as i32);
        Ok(())
    }

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        let days = context.reader.read_i32()?;
        EPOCH
            .checked_add_signed(Duration::days(days as i64))
            .ok_or_else(|| {
                Error::invalid_value(format!("date out of range, {days} days since epoch"))
            })
    }

    fn fory_get_type_id(_: &TypeResolver) -> Result<u32, Error> {
        Ok(LOCAL_DATE)
    }

    fn fory_reserved_space() -> usize {
        mem::size_of::<i32>()
    }
}

/// Instant: signed 64-bit seconds since epoch plus nanoseconds in
/// [0, 10^9).
impl Serializer for NaiveDateTime {
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        let instant = self.and_utc();
        context.writer.write_i64(instant.timestamp());
        context.writer.write_u32(instant.timestamp_subsec_nanos());
        Ok(())
    }

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        let seconds = context.reader.read_i64()?;
        let nanos = context.reader.read_u32()?;
        if nanos >= NANOS_PER_SECOND {
            return Err(Error::invalid_value(format!(
                "timestamp nanoseconds {nanos} not below 10^9"
            )));
        }
        DateTime::from_timestamp(seconds, nanos)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| {
                Error::invalid_value(format!("timestamp out of range: {seconds}s {nanos}ns"))
            })
    }

    fn fory_get_type_id(_: &TypeResolver) -> Result<u32, Error> {
        Ok(TIMESTAMP)
    }

    fn fory_reserved_space() -> usize {
        mem::size_of::<i64>() + mem::size_of::<u32>()
    }
}

/// Elapsed time: signed 64-bit nanoseconds.
impl Serializer for Duration {
    fn fory_write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        let nanos = self.num_nanoseconds().ok_or_else(|| {
            Error::invalid_value("duration overflows 64-bit nanoseconds")
        })?;
        context.writer.write_i64(nanos);
        Ok(())
    }

    fn fory_read_data(context: &mut ReadContext) -> Result<Self, Error> {
        Ok(Duration::nanoseconds(context.reader.read_i64()?))
    }

    fn fory_get_type_id(_: &TypeResolver) -> Result<u32, Error> {
        Ok(DURATION)
    }

    fn fory_reserved_space() -> usize {
        mem::size_of::<i64>()
    }
}

impl ForyDefault for NaiveDate {
    fn fory_default() -> Self {
        NaiveDate::default()
    }
}

impl ForyDefault for NaiveDateTime {
    fn fory_default() -> Self {
        NaiveDateTime::default()
    }
}

impl ForyDefault for Duration {
    fn fory_default() -> Self {
        Duration::zero()
    }
}

impl ForyGeneralList for NaiveDate {}
impl ForyGeneralList for NaiveDateTime {}
impl ForyGeneralList for Duration {}
