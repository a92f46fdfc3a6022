/*!

The routing unit of a router decides, for each packet arriving at the router, the output port and sometimes the virtual channel to forward it.

A [RoutingUnit] owns the tables filled during the topology construction and a [RoutingStrategy] selected by configuration.
see [`new_routing_strategy`](fn.new_routing_strategy.html) for documentation on the configuration syntax of predefined strategies.

*/

/// Contains PortDirection and DirectionRegistry.
pub mod direction;
/// Contains WeightedRoutingTable.
pub mod table;
/// Contains TableRouting, XY, DOR3D, Ring.
pub mod dimension_order;
/// Contains OddEven3D, PartiallyAdaptive3D, Extension3D, Custom.
pub mod adaptive;

use std::convert::TryFrom;
use std::fmt::Debug;
use std::mem::size_of;
use std::str::FromStr;

use ::rand::rngs::StdRng;

use crate::config_parser::ConfigurationValue;
use crate::destination::DestinationSet;
use crate::quantify::Quantifiable;
use crate::Plugs;
use crate::error;
pub use crate::error::Error;

pub use self::direction::{PortDirection,DirectionRegistry};
pub use self::table::WeightedRoutingTable;
pub use self::dimension_order::{TableRouting,XY,DOR3D,Ring};
pub use self::adaptive::{OddEven3D,PartiallyAdaptive3D,Extension3D,Custom,choose_adaptive_outport};

pub mod prelude
{
	pub use super::{new_routing_strategy,RoutingStrategy,RoutingRequest,RouteInfo,OutportSelection,RouterContext,TopologyExtents,UnitTables,StrategyBuilderArgument,PortDirection,Error};
}

///The route descriptor of a packet. Created by the caller for each packet and only read by the routing unit.
#[derive(Clone,Debug)]
pub struct RouteInfo
{
	///The router to which the destination interfaces are attached.
	pub destination_router: usize,
	///The traffic class of the packet.
	pub vnet: usize,
	///The network interfaces the packet is addressed to.
	pub destination: DestinationSet,
}

///The result of routing: the output port and, when the strategy decides it, the virtual channel.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct OutportSelection
{
	pub port: usize,
	///`None` lets the flow-control layer choose the virtual channel.
	pub virtual_channel: Option<usize>,
}

impl OutportSelection
{
	pub fn port(port:usize) -> OutportSelection
	{
		OutportSelection{ port, virtual_channel:None }
	}
	pub fn with_virtual_channel(port:usize, virtual_channel:usize) -> OutportSelection
	{
		OutportSelection{ port, virtual_channel:Some(virtual_channel) }
	}
}

///The sizes of the topology, as seen by the routers. Router indices are `x + columns*(y + rows*z)`.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct TopologyExtents
{
	pub rows: usize,
	pub columns: usize,
	pub depths: usize,
	pub routers: usize,
}

impl TopologyExtents
{
	///Coordinates `(x,y)` in a 2D mesh. The row is not reduced modulo `rows`.
	pub fn mesh_coordinates(&self, router:usize) -> (i32,i32)
	{
		assert!(self.rows>0 && self.columns>0,"mesh coordinates require rows and columns");
		((router%self.columns) as i32, (router/self.columns) as i32)
	}
	///Coordinates `[x,y,z]` in a 3D mesh.
	pub fn cube_coordinates(&self, router:usize) -> [i32;3]
	{
		assert!(self.rows>0 && self.columns>0,"mesh coordinates require rows and columns");
		let x = router % self.columns;
		let y = (router / self.columns) % self.rows;
		let z = router / (self.columns*self.rows);
		[x as i32, y as i32, z as i32]
	}
	///The signed hops `[dx,dy,dz]` from `origin` to `target` in a 3D mesh.
	pub fn cube_deltas(&self, origin:usize, target:usize) -> [i32;3]
	{
		let o = self.cube_coordinates(origin);
		let t = self.cube_coordinates(target);
		[t[0]-o[0], t[1]-o[1], t[2]-o[2]]
	}
}

///What the routing unit may ask to the router that contains it. All are read queries.
pub trait RouterContext
{
	///The index of this router.
	fn router_index(&self) -> usize;
	///The sizes of the topology.
	fn extents(&self) -> TopologyExtents;
	///Whether packets of `vnet` must be delivered in order, thus following a single path.
	fn is_vnet_ordered(&self, vnet:usize) -> bool;
	///The virtual channels currently free in the output unit `outport`. It changes every cycle.
	fn free_virtual_channels(&self, outport:usize) -> usize;
}

///The packet being routed together with how it arrived.
#[derive(Clone,Copy,Debug)]
pub struct RoutingRequest<'a>
{
	pub route: &'a RouteInfo,
	pub inport: usize,
	pub in_virtual_channel: usize,
	pub inport_direction: PortDirection,
}

///The tables of a routing unit, lent to its strategy.
#[derive(Clone,Copy,Debug)]
pub struct UnitTables<'a>
{
	pub table: &'a WeightedRoutingTable,
	pub outports: &'a DirectionRegistry,
}

impl<'a> UnitTables<'a>
{
	///Look the routing table for the route. The order of the vnet is asked to the router.
	pub fn lookup_routing_table(&self, route:&RouteInfo, router:&dyn RouterContext, rng:&mut StdRng) -> Result<OutportSelection,Error>
	{
		let ordered = router.is_vnet_ordered(route.vnet);
		self.table.lookup(route.vnet,&route.destination,ordered,rng)
	}
	///The outport wired towards `direction`.
	pub fn outport(&self, direction:PortDirection) -> Result<OutportSelection,Error>
	{
		Ok(OutportSelection::port(self.outports.port(direction)?))
	}
}

/**
A routing algorithm, selecting the outport for packets that are not for this router.
Packets that have arrived to their destination router are always routed by the table, as there may be several interfaces attached to the router.
**/
pub trait RoutingStrategy : Debug
{
	/// Compute the outport for `request.route`, which is not destined to `router`.
	/// `rng` is the generator of the routing unit.
	fn outport_compute(&self, request:&RoutingRequest, unit:&UnitTables, router:&dyn RouterContext, rng:&mut StdRng) -> Result<OutportSelection,Error>;
}

///The classic selection of routing algorithms, also accepted by its index in the configuration.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum RoutingAlgorithm
{
	Table,
	XY,
	Custom,
	Ring,
	DimensionOrder3D,
	OddEven3D,
	PartiallyAdaptive3D,
	Extension3D,
}

impl RoutingAlgorithm
{
	pub const ALL:[RoutingAlgorithm;8] = [
		RoutingAlgorithm::Table,
		RoutingAlgorithm::XY,
		RoutingAlgorithm::Custom,
		RoutingAlgorithm::Ring,
		RoutingAlgorithm::DimensionOrder3D,
		RoutingAlgorithm::OddEven3D,
		RoutingAlgorithm::PartiallyAdaptive3D,
		RoutingAlgorithm::Extension3D,
	];
	///The name of the configuration object.
	pub fn name(self) -> &'static str
	{
		match self
		{
			RoutingAlgorithm::Table => "Table",
			RoutingAlgorithm::XY => "XY",
			RoutingAlgorithm::Custom => "Custom",
			RoutingAlgorithm::Ring => "Ring",
			RoutingAlgorithm::DimensionOrder3D => "DOR3D",
			RoutingAlgorithm::OddEven3D => "OddEven3D",
			RoutingAlgorithm::PartiallyAdaptive3D => "PartiallyAdaptive3D",
			RoutingAlgorithm::Extension3D => "Extension3D",
		}
	}
	///The default configuration of the strategy.
	pub fn configuration(self) -> ConfigurationValue
	{
		ConfigurationValue::Object(self.name().to_string(),vec![])
	}
}

impl TryFrom<usize> for RoutingAlgorithm
{
	type Error = Error;
	fn try_from(index:usize) -> Result<RoutingAlgorithm,Error>
	{
		RoutingAlgorithm::ALL.get(index).copied().ok_or_else(||error!(bad_argument).with_message(format!("there is no routing algorithm with index {}",index)))
	}
}

impl FromStr for RoutingAlgorithm
{
	type Err = Error;
	fn from_str(s:&str) -> Result<RoutingAlgorithm,Error>
	{
		RoutingAlgorithm::ALL.iter().find(|a|a.name()==s).copied().ok_or_else(||error!(bad_argument).with_message(format!("there is no routing algorithm named {}",s)))
	}
}

///The argument of a builder function for `RoutingStrategy`s.
#[derive(Debug)]
pub struct StrategyBuilderArgument<'a>
{
	///A ConfigurationValue::Object defining the strategy.
	pub cv: &'a ConfigurationValue,
	///The user defined plugs. In case the strategy needs to create elements.
	pub plugs: &'a Plugs,
}

/**Build a new routing strategy.

The strategies are given by name, with some optional attributes. A number is also accepted, meaning the strategy in that position of the list below.

0. Routing by the weighted table. Ordered vnets always take the first link of minimum weight, unordered ones take one at random.
```ignore
Table
```
1. Dimension order routing in a 2D mesh. First East/West until the column is right, then North/South.
```ignore
XY
```
2. A template for routings by port direction. It fails when executed.
```ignore
Custom
```
3. Shortest direction in a ring, ties going Clockwise. The virtual channel is kept, except when leaving clockwise the last router or counterclockwise the router 0, where the packet moves into the escape channel.
```ignore
Ring{
	escape_virtual_channel: 1,//optional, defaults to 1.
}
```
4. Dimension order routing in a 3D mesh. X, then Y, then Z.
```ignore
DOR3D
```
5. Z first, then the odd-even turn model in the XY plane, choosing among the allowed directions the one with more free virtual channels.
```ignore
OddEven3D
```
6. Z first, then either X or Y, choosing the one with more free virtual channels.
```ignore
PartiallyAdaptive3D
```
7. A slot for some 3D routing to be written. It returns an invalid route.
```ignore
Extension3D
```

Strategies registered in the plugs are searched first, so a deployment can give its own `Custom` or `Extension3D`.
*/
pub fn new_routing_strategy(arg: StrategyBuilderArgument) -> Result<Box<dyn RoutingStrategy>,Error>
{
	match arg.cv
	{
		&ConfigurationValue::Object(ref cv_name, ref _cv_pairs) =>
		{
			if let Some(builder) = arg.plugs.routing_strategies.get(cv_name)
			{
				return Ok(builder(arg));
			}
			let algorithm:RoutingAlgorithm = cv_name.parse().map_err(|_|arg.cv.ill(&format!("Unknown routing strategy {}",cv_name)))?;
			Ok(match algorithm
			{
				RoutingAlgorithm::Table => Box::new(TableRouting::new(arg)?),
				RoutingAlgorithm::XY => Box::new(XY::new(arg)?),
				RoutingAlgorithm::Custom => Box::new(Custom::new(arg)?),
				RoutingAlgorithm::Ring => Box::new(Ring::new(arg)?),
				RoutingAlgorithm::DimensionOrder3D => Box::new(DOR3D::new(arg)?),
				RoutingAlgorithm::OddEven3D => Box::new(OddEven3D::new(arg)?),
				RoutingAlgorithm::PartiallyAdaptive3D => Box::new(PartiallyAdaptive3D::new(arg)?),
				RoutingAlgorithm::Extension3D => Box::new(Extension3D::new(arg)?),
			})
		},
		&ConfigurationValue::Number(_) =>
		{
			let index = arg.cv.as_usize()?;
			let algorithm = RoutingAlgorithm::try_from(index).map_err(|_|arg.cv.ill("Unknown routing algorithm index"))?;
			new_routing_strategy(StrategyBuilderArgument{cv:&algorithm.configuration(),..arg})
		},
		_ => Err(arg.cv.ill("Trying to create a routing strategy from a non-Object")),
	}
}

///Whether `vnet` is in `supported`. An empty list means that every vnet is supported.
pub fn vnet_supported(vnet:usize, supported:&[usize]) -> bool
{
	supported.is_empty() || supported.contains(&vnet)
}

/**
The routing unit of a router.
It is filled with `add_route`, `add_weight`, `add_in_direction`, and `add_out_direction` while the topology is being built. Afterwards only `compute_route` is used, which does not change the tables.
**/
#[derive(Debug)]
pub struct RoutingUnit
{
	table: WeightedRoutingTable,
	inports: DirectionRegistry,
	outports: DirectionRegistry,
	strategy: Box<dyn RoutingStrategy>,
	///The generator for the random choices of this unit.
	rng: StdRng,
}

impl RoutingUnit
{
	pub fn new(strategy:Box<dyn RoutingStrategy>, rng:StdRng) -> RoutingUnit
	{
		RoutingUnit{
			table: WeightedRoutingTable::new(),
			inports: DirectionRegistry::new(),
			outports: DirectionRegistry::new(),
			strategy,
			rng,
		}
	}
	///Append the destinations of the next link, one set per vnet.
	pub fn add_route(&mut self, entry:&[DestinationSet])
	{
		self.table.add_route(entry);
	}
	///Append the weight of the next link.
	pub fn add_weight(&mut self, weight:i32)
	{
		self.table.add_weight(weight);
	}
	pub fn add_in_direction(&mut self, direction:PortDirection, inport:usize)
	{
		self.inports.add(direction,inport);
	}
	pub fn add_out_direction(&mut self, direction:PortDirection, outport:usize)
	{
		self.outports.add(direction,outport);
	}
	pub fn inport_direction(&self, inport:usize) -> Option<PortDirection>
	{
		self.inports.direction(inport)
	}
	pub fn outport_direction(&self, outport:usize) -> Option<PortDirection>
	{
		self.outports.direction(outport)
	}
	pub fn outport(&self, direction:PortDirection) -> Result<usize,Error>
	{
		self.outports.port(direction)
	}
	pub fn table(&self) -> &WeightedRoutingTable
	{
		&self.table
	}
	/**
	Select the outport, and maybe the virtual channel, for the packet with `route` that arrived by `inport` in virtual channel `in_virtual_channel`.
	Packets for this router are routed by the table. Any other packet by the strategy.
	The virtual channel is only given by strategies that need to control it, as the Ring. Otherwise is left to the flow control.
	**/
	pub fn compute_route(&mut self, route:&RouteInfo, inport:usize, in_virtual_channel:usize, inport_direction:PortDirection, router:&dyn RouterContext) -> Result<OutportSelection,Error>
	{
		let RoutingUnit{ref table, ref outports, ref strategy, ref mut rng, ..} = *self;
		let unit = UnitTables{ table, outports };
		if route.destination_router == router.router_index()
		{
			return unit.lookup_routing_table(route,router,rng);
		}
		let request = RoutingRequest{ route, inport, in_virtual_channel, inport_direction };
		strategy.outport_compute(&request,&unit,router,rng)
	}
}

impl Quantifiable for RoutingUnit
{
	fn total_memory(&self) -> usize
	{
		size_of::<RoutingUnit>() - size_of::<WeightedRoutingTable>() - 2*size_of::<DirectionRegistry>()
			+ self.table.total_memory() + self.inports.total_memory() + self.outports.total_memory()
	}
	fn print_memory_breakdown(&self)
	{
		println!("table: {}",self.table.total_memory());
		println!("inports: {}",self.inports.total_memory());
		println!("outports: {}",self.outports.total_memory());
	}
	fn forecast_total_memory(&self) -> usize
	{
		self.total_memory()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use crate::error::ErrorKind;

	pub(crate) struct FixedRouter
	{
		pub index: usize,
		pub extents: TopologyExtents,
		pub ordered: Vec<usize>,
		pub free: Vec<usize>,
	}

	impl RouterContext for FixedRouter
	{
		fn router_index(&self) -> usize { self.index }
		fn extents(&self) -> TopologyExtents { self.extents }
		fn is_vnet_ordered(&self, vnet:usize) -> bool { self.ordered.contains(&vnet) }
		fn free_virtual_channels(&self, outport:usize) -> usize { self.free.get(outport).copied().unwrap_or(0) }
	}

	fn build(cv:&ConfigurationValue) -> Result<Box<dyn RoutingStrategy>,Error>
	{
		let plugs = Plugs::default();
		new_routing_strategy(StrategyBuilderArgument{cv,plugs:&plugs})
	}

	#[test]
	fn vnet_support()
	{
		assert!(vnet_supported(7,&[]));
		assert!(!vnet_supported(2,&[1,3]));
		assert!(vnet_supported(3,&[1,3]));
	}

	#[test]
	fn strategies_by_name_and_index()
	{
		for (index,algorithm) in RoutingAlgorithm::ALL.iter().enumerate()
		{
			assert_eq!(RoutingAlgorithm::try_from(index).expect("index in range"),*algorithm);
			assert_eq!(algorithm.name().parse::<RoutingAlgorithm>().expect("known name"),*algorithm);
			assert!(build(&algorithm.configuration()).is_ok());
			assert!(build(&ConfigurationValue::Number(index as f64)).is_ok());
		}
		assert!(build(&ConfigurationValue::Number(8.0)).is_err());
		assert!(build(&ConfigurationValue::Object("Shortest".to_string(),vec![])).is_err());
		assert!(build(&ConfigurationValue::Object("XY".to_string(),vec![("bogus".to_string(),ConfigurationValue::True)])).is_err());
	}

	#[derive(Debug)]
	struct AlwaysLocal{}
	impl RoutingStrategy for AlwaysLocal
	{
		fn outport_compute(&self, _request:&RoutingRequest, unit:&UnitTables, _router:&dyn RouterContext, _rng:&mut StdRng) -> Result<OutportSelection,Error>
		{
			unit.outport(PortDirection::Local)
		}
	}
	fn build_always_local(_arg:StrategyBuilderArgument) -> Box<dyn RoutingStrategy>
	{
		Box::new(AlwaysLocal{})
	}

	#[test]
	fn plugged_strategy_replaces_placeholder()
	{
		let mut plugs = Plugs::default();
		plugs.add_routing_strategy("Custom".to_string(),build_always_local);
		let cv = RoutingAlgorithm::Custom.configuration();
		let strategy = new_routing_strategy(StrategyBuilderArgument{cv:&cv,plugs:&plugs}).expect("plugged");
		let mut unit = RoutingUnit::new(strategy,StdRng::seed_from_u64(1));
		unit.add_out_direction(PortDirection::Local,0);
		let router = FixedRouter{ index:0, extents:TopologyExtents{rows:1,columns:2,depths:1,routers:2}, ordered:vec![], free:vec![] };
		let route = RouteInfo{ destination_router:1, vnet:0, destination:DestinationSet::single(1) };
		let selection = unit.compute_route(&route,0,0,PortDirection::Local,&router).expect("plugged strategy routes");
		assert_eq!(selection,OutportSelection::port(0));
	}

	#[test]
	fn local_delivery_bypasses_the_strategy()
	{
		//Custom would fail, but the packet is for this router.
		let strategy = build(&RoutingAlgorithm::Custom.configuration()).expect("builds");
		let mut unit = RoutingUnit::new(strategy,StdRng::seed_from_u64(1));
		//Two interfaces 4 and 5 on this router, plus a link to the East.
		unit.add_route(&[DestinationSet::single(4)]);
		unit.add_weight(1);
		unit.add_out_direction(PortDirection::Local,0);
		unit.add_route(&[DestinationSet::single(5)]);
		unit.add_weight(1);
		unit.add_route(&[vec![6,7].into_iter().collect()]);
		unit.add_weight(1);
		unit.add_out_direction(PortDirection::East,2);
		let router = FixedRouter{ index:3, extents:TopologyExtents{rows:1,columns:4,depths:1,routers:4}, ordered:vec![0], free:vec![] };
		let route = RouteInfo{ destination_router:3, vnet:0, destination:DestinationSet::single(5) };
		let selection = unit.compute_route(&route,2,0,PortDirection::East,&router).expect("table route");
		assert_eq!(selection,OutportSelection::port(1));
		let route = RouteInfo{ destination_router:2, vnet:0, destination:DestinationSet::single(6) };
		match unit.compute_route(&route,0,0,PortDirection::Local,&router)
		{
			Err(Error{kind:ErrorKind::UnimplementedStrategy{..},..}) => (),
			x => panic!("Custom should not route, got {:?}",x),
		}
	}
}
