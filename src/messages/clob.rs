//! Order-book messages (`dydxprotocol.clob`, `dydxprotocol.subaccounts`).

use crate::codec::{expect_wire_type, CodecError, EnumValue, Enumeration, Message};
use crate::reader::Reader;
use crate::wire::{Tag, WireType};
use crate::writer::Writer;

/// Unique identifier for a subaccount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SubaccountId {
    /// Address of the owning wallet. Default `""`.
    pub owner: String,
    /// Subaccount number for the owner. Default `0`.
    pub number: u32,
}

impl Message for SubaccountId {
    fn encode_raw(&self, w: &mut Writer) {
        if !self.owner.is_empty() {
            w.tag(1, WireType::LengthDelimited).string(&self.owner);
        }
        if self.number != 0 {
            w.tag(2, WireType::Varint).uint32(self.number);
        }
    }

    fn merge_field(&mut self, tag: Tag, r: &mut Reader<'_>) -> Result<bool, CodecError> {
        match tag.field_number() {
            1 if expect_wire_type(tag, WireType::LengthDelimited) => {
                self.owner = r.string()?.to_owned();
            }
            2 if expect_wire_type(tag, WireType::Varint) => self.number = r.uint32()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Identifies an order across its lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OrderId {
    /// Default `None`.
    pub subaccount_id: Option<SubaccountId>,
    /// Client-chosen id, `fixed32` on the wire. Default `0`.
    pub client_id: u32,
    /// Short-term / conditional / long-term bits. Default `0`.
    pub order_flags: u32,
    /// Default `0`.
    pub clob_pair_id: u32,
}

impl Message for OrderId {
    fn encode_raw(&self, w: &mut Writer) {
        if let Some(sub) = &self.subaccount_id {
            sub.encode_nested(1, w);
        }
        if self.client_id != 0 {
            w.tag(2, WireType::Fixed32).fixed32(self.client_id);
        }
        if self.order_flags != 0 {
            w.tag(3, WireType::Varint).uint32(self.order_flags);
        }
        if self.clob_pair_id != 0 {
            w.tag(4, WireType::Varint).uint32(self.clob_pair_id);
        }
    }

    fn merge_field(&mut self, tag: Tag, r: &mut Reader<'_>) -> Result<bool, CodecError> {
        match tag.field_number() {
            1 if expect_wire_type(tag, WireType::LengthDelimited) => self
                .subaccount_id
                .get_or_insert_with(SubaccountId::default)
                .merge_length_delimited(r)?,
            2 if expect_wire_type(tag, WireType::Fixed32) => self.client_id = r.fixed32()?,
            3 if expect_wire_type(tag, WireType::Varint) => self.order_flags = r.uint32()?,
            4 if expect_wire_type(tag, WireType::Varint) => self.clob_pair_id = r.uint32()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Side of the book an order rests on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Side {
    /// Invalid for placement.
    #[default]
    Unspecified = 0,
    Buy = 1,
    Sell = 2,
}

impl Enumeration for Side {
    fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Side::Unspecified),
            1 => Some(Side::Buy),
            2 => Some(Side::Sell),
            _ => None,
        }
    }

    fn to_i32(self) -> i32 {
        self as i32
    }

    fn as_str_name(self) -> &'static str {
        match self {
            Side::Unspecified => "SIDE_UNSPECIFIED",
            Side::Buy => "SIDE_BUY",
            Side::Sell => "SIDE_SELL",
        }
    }

    fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "SIDE_UNSPECIFIED" => Some(Side::Unspecified),
            "SIDE_BUY" => Some(Side::Buy),
            "SIDE_SELL" => Some(Side::Sell),
            _ => None,
        }
    }
}

/// How long an order stays active before it executes or expires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeInForce {
    /// Match what crosses, rest the remainder as a maker order.
    #[default]
    Unspecified = 0,
    /// Immediate-or-cancel.
    Ioc = 1,
    PostOnly = 2,
    FillOrKill = 3,
}

impl Enumeration for TimeInForce {
    fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(TimeInForce::Unspecified),
            1 => Some(TimeInForce::Ioc),
            2 => Some(TimeInForce::PostOnly),
            3 => Some(TimeInForce::FillOrKill),
            _ => None,
        }
    }

    fn to_i32(self) -> i32 {
        self as i32
    }

    fn as_str_name(self) -> &'static str {
        match self {
            TimeInForce::Unspecified => "TIME_IN_FORCE_UNSPECIFIED",
            TimeInForce::Ioc => "TIME_IN_FORCE_IOC",
            TimeInForce::PostOnly => "TIME_IN_FORCE_POST_ONLY",
            TimeInForce::FillOrKill => "TIME_IN_FORCE_FILL_OR_KILL",
        }
    }

    fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "TIME_IN_FORCE_UNSPECIFIED" => Some(TimeInForce::Unspecified),
            "TIME_IN_FORCE_IOC" => Some(TimeInForce::Ioc),
            "TIME_IN_FORCE_POST_ONLY" => Some(TimeInForce::PostOnly),
            "TIME_IN_FORCE_FILL_OR_KILL" => Some(TimeInForce::FillOrKill),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConditionType {
    #[default]
    Unspecified = 0,
    StopLoss = 1,
    TakeProfit = 2,
}

impl Enumeration for ConditionType {
    fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(ConditionType::Unspecified),
            1 => Some(ConditionType::StopLoss),
            2 => Some(ConditionType::TakeProfit),
            _ => None,
        }
    }

    fn to_i32(self) -> i32 {
        self as i32
    }

    fn as_str_name(self) -> &'static str {
        match self {
            ConditionType::Unspecified => "CONDITION_TYPE_UNSPECIFIED",
            ConditionType::StopLoss => "CONDITION_TYPE_STOP_LOSS",
            ConditionType::TakeProfit => "CONDITION_TYPE_TAKE_PROFIT",
        }
    }

    fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "CONDITION_TYPE_UNSPECIFIED" => Some(ConditionType::Unspecified),
            "CONDITION_TYPE_STOP_LOSS" => Some(ConditionType::StopLoss),
            "CONDITION_TYPE_TAKE_PROFIT" => Some(ConditionType::TakeProfit),
            _ => None,
        }
    }
}

/// Expiry of an order: a block height or a unix timestamp in seconds. At most one is set; the
/// last one on the wire wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoodTil {
    Block(u32),
    BlockTime(u32),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Order {
    /// Default `None`.
    pub order_id: Option<OrderId>,
    pub side: EnumValue<Side>,
    /// Size in base quantums. Default `0`.
    pub quantums: u64,
    /// Price in subticks. Default `0`.
    pub subticks: u64,
    /// Default `None`; when set it is written even if zero.
    pub good_til: Option<GoodTil>,
    pub time_in_force: EnumValue<TimeInForce>,
    pub reduce_only: bool,
    /// Opaque to the protocol. Default `0`.
    pub client_metadata: u32,
    pub condition_type: EnumValue<ConditionType>,
    /// Trigger price for conditional orders. Default `0`.
    pub conditional_order_trigger_subticks: u64,
}

impl Message for Order {
    fn encode_raw(&self, w: &mut Writer) {
        if let Some(id) = &self.order_id {
            id.encode_nested(1, w);
        }
        if self.side.to_i32() != 0 {
            w.tag(2, WireType::Varint).enumeration(self.side.to_i32());
        }
        if self.quantums != 0 {
            w.tag(3, WireType::Varint).uint64(self.quantums);
        }
        if self.subticks != 0 {
            w.tag(4, WireType::Varint).uint64(self.subticks);
        }
        match self.good_til {
            Some(GoodTil::Block(b)) => {
                w.tag(5, WireType::Varint).uint32(b);
            }
            Some(GoodTil::BlockTime(t)) => {
                w.tag(6, WireType::Fixed32).fixed32(t);
            }
            None => {}
        }
        if self.time_in_force.to_i32() != 0 {
            w.tag(7, WireType::Varint).enumeration(self.time_in_force.to_i32());
        }
        if self.reduce_only {
            w.tag(8, WireType::Varint).bool(true);
        }
        if self.client_metadata != 0 {
            w.tag(9, WireType::Varint).uint32(self.client_metadata);
        }
        if self.condition_type.to_i32() != 0 {
            w.tag(10, WireType::Varint).enumeration(self.condition_type.to_i32());
        }
        if self.conditional_order_trigger_subticks != 0 {
            w.tag(11, WireType::Varint)
                .uint64(self.conditional_order_trigger_subticks);
        }
    }

    fn merge_field(&mut self, tag: Tag, r: &mut Reader<'_>) -> Result<bool, CodecError> {
        use WireType::{Fixed32, LengthDelimited, Varint};
        match tag.field_number() {
            1 if expect_wire_type(tag, LengthDelimited) => self
                .order_id
                .get_or_insert_with(OrderId::default)
                .merge_length_delimited(r)?,
            2 if expect_wire_type(tag, Varint) => self.side = EnumValue::from_i32(r.enumeration()?),
            3 if expect_wire_type(tag, Varint) => self.quantums = r.uint64()?,
            4 if expect_wire_type(tag, Varint) => self.subticks = r.uint64()?,
            5 if expect_wire_type(tag, Varint) => self.good_til = Some(GoodTil::Block(r.uint32()?)),
            6 if expect_wire_type(tag, Fixed32) => {
                self.good_til = Some(GoodTil::BlockTime(r.fixed32()?));
            }
            7 if expect_wire_type(tag, Varint) => {
                self.time_in_force = EnumValue::from_i32(r.enumeration()?);
            }
            8 if expect_wire_type(tag, Varint) => self.reduce_only = r.bool()?,
            9 if expect_wire_type(tag, Varint) => self.client_metadata = r.uint32()?,
            10 if expect_wire_type(tag, Varint) => {
                self.condition_type = EnumValue::from_i32(r.enumeration()?);
            }
            11 if expect_wire_type(tag, Varint) => {
                self.conditional_order_trigger_subticks = r.uint64()?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Orders filled in the most recent block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OrdersFilledDuringLatestBlock {
    pub order_ids: Vec<OrderId>,
}

impl Message for OrdersFilledDuringLatestBlock {
    fn encode_raw(&self, w: &mut Writer) {
        for id in &self.order_ids {
            id.encode_nested(1, w);
        }
    }

    fn merge_field(&mut self, tag: Tag, r: &mut Reader<'_>) -> Result<bool, CodecError> {
        match tag.field_number() {
            1 if expect_wire_type(tag, WireType::LengthDelimited) => {
                let mut id = OrderId::default();
                id.merge_length_delimited(r)?;
                self.order_ids.push(id);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}
