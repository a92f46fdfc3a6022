/*!

A network of routers, each with its routing unit filled from a topology.

The outport 0 and the inport 0 of every router are its `Local` ports. The remaining ports follow the order of [Topology::links]. Every outport gets, for each vnet, the set of destinations whose weighted shortest paths may start through it.

*/

use std::mem::size_of;

use ::rand::{rngs::StdRng,Rng,SeedableRng};

use crate::config_parser::ConfigurationValue;
use crate::destination::DestinationSet;
use crate::matrix::Matrix;
use crate::quantify::Quantifiable;
use crate::routing::{RoutingUnit,RouteInfo,OutportSelection,RouterContext,TopologyExtents,PortDirection,StrategyBuilderArgument,new_routing_strategy,vnet_supported};
use crate::{match_object,Plugs};
use crate::error;
use crate::error::*;
use super::{Topology,TopologyBuilderArgument,new_topology};

///A step of a traced packet: the router, the outport it selected and the virtual channel it used to leave.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct Hop
{
	pub router: usize,
	pub outport: usize,
	pub direction: PortDirection,
	pub virtual_channel: usize,
}

///What the routing units may query of the network.
#[derive(Debug)]
struct NetworkState
{
	extents: TopologyExtents,
	ordered_vnets: Vec<usize>,
	///`free_virtual_channels[router][outport]`
	free_virtual_channels: Vec<Vec<usize>>,
}

///A router as seen by its own routing unit.
struct RouterView<'a>
{
	state: &'a NetworkState,
	router: usize,
}

impl<'a> RouterContext for RouterView<'a>
{
	fn router_index(&self) -> usize
	{
		self.router
	}
	fn extents(&self) -> TopologyExtents
	{
		self.state.extents
	}
	fn is_vnet_ordered(&self, vnet:usize) -> bool
	{
		self.state.ordered_vnets.contains(&vnet)
	}
	fn free_virtual_channels(&self, outport:usize) -> usize
	{
		self.state.free_virtual_channels[self.router].get(outport).copied().unwrap_or(0)
	}
}

/**
The routers of a topology with their routing units.

```ignore
Network{
	topology: Ring{routers:8},
	routing: Ring,
	vnets: 3,//optional, defaults to 1
	ordered_vnets: [0],//optional
	internal_vnets: [],//optional. The vnets allowed between routers. Empty means all.
	virtual_channels: 2,//optional, defaults to 2
	random_seed: 42,//optional, defaults to 1
}
```
**/
#[derive(Debug)]
pub struct Network
{
	topology: Box<dyn Topology>,
	units: Vec<RoutingUnit>,
	///`neighbours[router][outport]` is the router and inport at the other side, or None for the Local port.
	neighbours: Vec<Vec<Option<(usize,usize)>>>,
	vnets: usize,
	virtual_channels: usize,
	state: NetworkState,
}

impl Network
{
	pub fn new(cv:&ConfigurationValue, plugs:&Plugs) -> Result<Network,Error>
	{
		let mut topology=None;
		let mut routing=None;
		let mut vnets=1;
		let mut ordered_vnets=vec![];
		let mut internal_vnets=vec![];
		let mut virtual_channels=2;
		let mut master_rng=None;
		match_object!(cv,"Network",value,
			"topology" => topology=Some(new_topology(TopologyBuilderArgument{cv:value,plugs})?),
			"routing" => routing=Some(value.clone()),
			"vnets" => vnets=value.as_usize()?,
			"ordered_vnets" => ordered_vnets=value.as_usize_list()?,
			"internal_vnets" => internal_vnets=value.as_usize_list()?,
			"virtual_channels" => virtual_channels=value.as_usize()?,
			"random_seed" => master_rng=Some(value.as_rng()?),
		);
		let topology=topology.ok_or_else(||cv.ill("There were no topology"))?;
		let routing=routing.ok_or_else(||cv.ill("There were no routing"))?;
		if vnets==0 || virtual_channels==0
		{
			return Err(cv.ill("A network needs at least one vnet and one virtual channel"));
		}
		if let Some(vnet) = ordered_vnets.iter().chain(internal_vnets.iter()).find(|&&v|v>=vnets)
		{
			return Err(cv.ill(&format!("vnet {} is out of range, there are only {} vnets",vnet,vnets)));
		}
		let n = topology.num_routers();
		let links:Vec<_> = (0..n).map(|router|topology.links(router)).collect();
		let mut distance:Matrix<Option<u64>> = Matrix::constant(None,n,n);
		for (router,router_links) in links.iter().enumerate()
		{
			for link in router_links
			{
				let weight = link.weight as u64;
				let entry = distance.get_mut(router,link.neighbour);
				match *entry
				{
					Some(current) if current<=weight => (),
					_ => *entry=Some(weight),
				}
			}
		}
		distance.close_shortest_paths();
		let mut master_rng = master_rng.unwrap_or_else(||StdRng::seed_from_u64(1));
		let mut units = Vec::with_capacity(n);
		for router in 0..n
		{
			let strategy = new_routing_strategy(StrategyBuilderArgument{cv:&routing,plugs})?;
			let mut unit = RoutingUnit::new(strategy,StdRng::seed_from_u64(master_rng.gen()));
			unit.add_route(&vec![DestinationSet::single(router);vnets]);
			unit.add_weight(1);
			unit.add_out_direction(PortDirection::Local,0);
			unit.add_in_direction(PortDirection::Local,0);
			for (index,link) in links[router].iter().enumerate()
			{
				//Destinations with a shortest path starting by this link.
				let reach:DestinationSet = (0..n).filter(|&target|{
					let through = distance.get(link.neighbour,target).map(|d|d+link.weight as u64);
					target!=router && through.is_some() && *distance.get(router,target)==through
				}).collect();
				let entry:Vec<DestinationSet> = (0..vnets).map(|vnet|
					if vnet_supported(vnet,&internal_vnets) { reach.clone() } else { DestinationSet::new() }
				).collect();
				unit.add_route(&entry);
				unit.add_weight(link.weight);
				unit.add_out_direction(link.direction,index+1);
			}
			units.push(unit);
		}
		let mut next_inport = vec![1;n];
		let mut neighbours = Vec::with_capacity(n);
		for router_links in links.iter()
		{
			let mut ports = vec![None];
			for link in router_links
			{
				let inport = next_inport[link.neighbour];
				next_inport[link.neighbour]+=1;
				units[link.neighbour].add_in_direction(link.direction.opposite(),inport);
				ports.push(Some((link.neighbour,inport)));
			}
			neighbours.push(ports);
		}
		let free_virtual_channels = links.iter().map(|router_links|vec![virtual_channels;router_links.len()+1]).collect();
		let state = NetworkState{
			extents: topology.extents(),
			ordered_vnets,
			free_virtual_channels,
		};
		Ok(Network{
			topology,
			units,
			neighbours,
			vnets,
			virtual_channels,
			state,
		})
	}
	pub fn num_routers(&self) -> usize
	{
		self.units.len()
	}
	pub fn topology(&self) -> &dyn Topology
	{
		self.topology.as_ref()
	}
	pub fn extents(&self) -> TopologyExtents
	{
		self.state.extents
	}
	pub fn vnets(&self) -> usize
	{
		self.vnets
	}
	pub fn virtual_channels(&self) -> usize
	{
		self.virtual_channels
	}
	pub fn unit(&self, router:usize) -> Option<&RoutingUnit>
	{
		self.units.get(router)
	}
	///The router and inport reached by leaving `router` through `outport`. None for the Local port.
	pub fn neighbour(&self, router:usize, outport:usize) -> Option<(usize,usize)>
	{
		self.neighbours.get(router).and_then(|ports|ports.get(outport).copied().flatten())
	}
	///The route descriptor of a packet for the network interface of `destination`.
	pub fn route_info(&self, destination:usize, vnet:usize) -> RouteInfo
	{
		RouteInfo{
			destination_router: destination,
			vnet,
			destination: DestinationSet::single(destination),
		}
	}
	///Set how many virtual channels the adaptive strategies see free in an outport.
	pub fn set_free_virtual_channels(&mut self, router:usize, outport:usize, count:usize) -> Result<(),Error>
	{
		match self.state.free_virtual_channels.get_mut(router).and_then(|ports|ports.get_mut(outport))
		{
			Some(entry) =>
			{
				*entry = count;
				Ok(())
			},
			None => Err(error!(bad_argument).with_message(format!("router {} has no outport {}",router,outport))),
		}
	}
	///Call the routing unit of `router` for a packet arriving by `inport` in `in_virtual_channel`.
	pub fn route(&mut self, router:usize, route:&RouteInfo, inport:usize, in_virtual_channel:usize) -> Result<OutportSelection,Error>
	{
		if router>=self.units.len()
		{
			return Err(error!(bad_argument).with_message(format!("there is no router {}",router)));
		}
		let inport_direction = self.units[router].inport_direction(inport).ok_or_else(||error!(bad_argument).with_message(format!("router {} has no inport {}",router,inport)))?;
		let Network{ref mut units, ref state, ..} = *self;
		units[router].compute_route(route,inport,in_virtual_channel,inport_direction,&RouterView{state,router})
	}
	/**
	Follow a packet from the interface of `source` to the interface of `destination`.
	The packet is injected in the virtual channel 0. When a strategy leaves the virtual channel free the packet takes the 0.
	The last hop is the one into the Local port of `destination`.
	**/
	pub fn trace(&mut self, source:usize, destination:usize, vnet:usize) -> Result<Vec<Hop>,Error>
	{
		let n = self.num_routers();
		if source>=n || destination>=n
		{
			return Err(error!(bad_argument).with_message(format!("routers must be below {}, got {} and {}",n,source,destination)));
		}
		if vnet>=self.vnets
		{
			return Err(error!(bad_argument).with_message(format!("vnet {} is out of range, there are only {} vnets",vnet,self.vnets)));
		}
		let route = self.route_info(destination,vnet);
		let mut hops = vec![];
		let mut current = source;
		let mut inport = 0;
		let mut virtual_channel = 0;
		loop
		{
			if hops.len() > n*n
			{
				return Err(error!(bad_argument).with_message(format!("packet from {} to {} did not arrive after {} hops",source,destination,hops.len())));
			}
			let selection = self.route(current,&route,inport,virtual_channel)?;
			let direction = self.units[current].outport_direction(selection.port).ok_or_else(||error!(invalid_route).with_message(format!("router {} selected the unknown outport {}",current,selection.port)))?;
			let out_virtual_channel = selection.virtual_channel.unwrap_or(0);
			if out_virtual_channel >= self.virtual_channels
			{
				return Err(error!(invalid_route).with_message(format!("router {} selected the virtual channel {} but there are only {}",current,out_virtual_channel,self.virtual_channels)));
			}
			hops.push(Hop{
				router: current,
				outport: selection.port,
				direction,
				virtual_channel: out_virtual_channel,
			});
			match self.neighbour(current,selection.port)
			{
				None if current==destination => return Ok(hops),
				None => return Err(error!(invalid_route).with_message(format!("packet for {} was consumed at router {}",destination,current))),
				Some((next,next_inport)) =>
				{
					current = next;
					inport = next_inport;
					virtual_channel = out_virtual_channel;
				},
			}
		}
	}
}

impl Quantifiable for Network
{
	fn total_memory(&self) -> usize
	{
		let neighbours:usize = self.neighbours.iter().map(|ports|size_of::<Vec<Option<(usize,usize)>>>() + ports.capacity()*size_of::<Option<(usize,usize)>>()).sum();
		size_of::<Network>() + self.topology.total_memory() + self.units.total_memory() + neighbours
			+ self.state.ordered_vnets.total_memory() + self.state.free_virtual_channels.total_memory()
	}
	fn print_memory_breakdown(&self)
	{
		println!("topology: {}",self.topology.total_memory());
		println!("routing units: {}",self.units.total_memory());
		println!("free virtual channels: {}",self.state.free_virtual_channels.total_memory());
	}
	fn forecast_total_memory(&self) -> usize
	{
		self.total_memory()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parse_configuration;

	fn network(source:&str) -> Network
	{
		let cv = parse_configuration(source).expect("valid configuration");
		Network::new(&cv,&Plugs::default()).expect("valid network")
	}

	#[test]
	fn ring_tables()
	{
		let net = network("Network{ topology: Ring{routers:6}, routing: Table, vnets: 2, internal_vnets: [1] }");
		let table = net.unit(0).expect("router 0 exists").table();
		//Local, Clockwise, Counterclockwise.
		assert_eq!(table.num_vnets(),2);
		assert_eq!(table.candidates(1,&DestinationSet::single(0)).expect("lookup"),vec![0]);
		assert_eq!(table.candidates(1,&DestinationSet::single(2)).expect("lookup"),vec![1]);
		assert_eq!(table.candidates(1,&DestinationSet::single(3)).expect("lookup"),vec![1,2]);
		assert_eq!(table.candidates(1,&DestinationSet::single(5)).expect("lookup"),vec![2]);
		//vnet 0 is not allowed between routers.
		assert!(table.candidates(0,&DestinationSet::single(2)).expect("lookup").is_empty());
		//Inports are numbered in the order the links are found.
		assert_eq!(net.neighbour(0,1),Some((1,1)));
		assert_eq!(net.neighbour(0,2),Some((5,1)));
		assert_eq!(net.neighbour(0,0),None);
		assert_eq!(net.unit(1).expect("router 1 exists").inport_direction(1),Some(PortDirection::Counterclockwise));
		assert_eq!(net.unit(1).expect("router 1 exists").inport_direction(2),Some(PortDirection::Clockwise));
	}

	#[test]
	fn mesh_weights_prefer_x()
	{
		let mut net = network("Network{ topology: Mesh{rows:3, columns:3}, routing: Table, ordered_vnets: [0] }");
		//Both East and North are on shortest paths, but East has less weight.
		let hops = net.trace(0,8,0).expect("arrives");
		let directions:Vec<PortDirection> = hops.iter().map(|h|h.direction).collect();
		use PortDirection::*;
		assert_eq!(directions,vec![East,East,North,North,Local]);
	}

	#[test]
	fn free_channels_steer_adaptive_routing()
	{
		let mut net = network("Network{ topology: Mesh{rows:2, columns:2, depths:1}, routing: PartiallyAdaptive3D }");
		//Router 0 has Local 0, East 1, North 2.
		net.set_free_virtual_channels(0,1,0).expect("outport exists");
		let hops = net.trace(0,3,0).expect("arrives");
		assert_eq!(hops[0].direction,PortDirection::North);
		assert_eq!(hops.len(),3);
		assert!(net.set_free_virtual_channels(0,3,1).is_err());
	}

	#[test]
	fn bad_configurations()
	{
		let plugs = Plugs::default();
		for source in &[
			"Network{ routing: XY }",
			"Network{ topology: Ring{routers:4} }",
			"Network{ topology: Ring{routers:4}, routing: 9 }",
			"Network{ topology: Ring{routers:4}, routing: Ring, vnets: 2, ordered_vnets: [2] }",
			"Network{ topology: Torus{sides:[4,4]}, routing: XY }",
			"Network{ topology: Ring{routers:4}, routing: Ring, servers: 4 }",
			"Network{ topology: Ring{routers:4}, routing: Ring, random_seed: 2.5 }",
			"Network{ topology: Ring{routers:4}, routing: Table{weights:1} }",
			"Network{ topology: Mesh{rows:2, columns:2, depths:2}, routing: OddEven3D{turns:2} }",
		]
		{
			let cv = parse_configuration(source).expect("valid syntax");
			assert!(Network::new(&cv,&plugs).is_err(),"{} should be rejected",source);
		}
	}

	#[test]
	fn trace_arguments()
	{
		let mut net = network("Network{ topology: Ring{routers:4}, routing: Ring }");
		assert!(net.trace(0,4,0).is_err());
		assert!(net.trace(0,1,1).is_err());
		assert!(net.unit(3).is_some());
		assert!(net.unit(4).is_none());
		let hops = net.trace(2,2,0).expect("local delivery");
		assert_eq!(hops,vec![Hop{router:2,outport:0,direction:PortDirection::Local,virtual_channel:0}]);
		assert!(net.total_memory() > 0);
	}
}
